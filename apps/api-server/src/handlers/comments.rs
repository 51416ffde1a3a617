//! Comment handlers.
//!
//! Comments live inside their post, so every mutation here rewrites the
//! owning post through the repository.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::auth::Identity;
use crate::middleware::authz;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::posts::post_to_response;

pub(crate) fn comment_to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        author: comment.author,
        body: comment.body,
    }
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let body: Vec<CommentResponse> = post.comments.into_iter().map(comment_to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let req = body.into_inner();
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("comment body is required".to_string()));
    }

    let post_id = path.into_inner();
    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // The author is the authenticated requester, never the body
    post.add_comment(identity.username, req.body);

    let saved = state.posts.update(post).await?;

    Ok(HttpResponse::Created().json(post_to_response(saved)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let comment_id = path.into_inner();
    let mut post =
        authz::require_comment_owner(state.posts.as_ref(), comment_id, &identity).await?;

    post.remove_comment(comment_id)?;
    state.posts.update(post).await?;

    Ok(HttpResponse::NoContent().finish())
}
