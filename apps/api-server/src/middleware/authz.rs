//! Authorization guards - account-status and ownership checks.
//!
//! Guards return `AppResult`, so mutating handlers compose them with `?`
//! and any failure short-circuits before the handler touches the store.

use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::ports::PostRepository;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// Reject requests from blocked accounts.
pub fn require_active(identity: &Identity) -> AppResult<()> {
    if identity.blocked {
        return Err(AppError::Forbidden("User is blocked".to_string()));
    }
    Ok(())
}

/// Resolve the post and require the requester to be its author.
///
/// Administrators skip the ownership comparison but still see a 404 for a
/// missing post. Returns the post so the handler does not fetch it twice.
pub async fn require_post_owner(
    posts: &dyn PostRepository,
    post_id: Uuid,
    identity: &Identity,
) -> AppResult<Post> {
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !identity.role.can_moderate() && post.author != identity.username {
        return Err(AppError::Forbidden(
            "You do not have permission to modify this post".to_string(),
        ));
    }

    Ok(post)
}

/// Resolve the post containing the comment and require the requester to be
/// the comment's author.
pub async fn require_comment_owner(
    posts: &dyn PostRepository,
    comment_id: Uuid,
    identity: &Identity,
) -> AppResult<Post> {
    let post = posts
        .find_by_comment_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if !identity.role.can_moderate() {
        let is_owner = post
            .find_comment(comment_id)
            .is_some_and(|c| c.author == identity.username);

        if !is_owner {
            return Err(AppError::Forbidden(
                "You do not have permission to modify this comment".to_string(),
            ));
        }
    }

    Ok(post)
}
