//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::authz;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::comments::comment_to_response;

pub(crate) fn post_to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author: post.author,
        title: post.title,
        content: post.content,
        category: post.category,
        created_at: post.created_at.to_rfc3339(),
        modified_at: post.modified_at.to_rfc3339(),
        comments: post.comments.into_iter().map(comment_to_response).collect(),
    }
}

/// An absent or blank category means "uncategorized".
fn normalize_category(category: Option<String>) -> Option<String> {
    category.filter(|c| !c.trim().is_empty())
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    // An empty category parameter means no filter
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let posts = state.posts.list(category).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(post_to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post_to_response(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let req = body.into_inner();
    let post = Post::new(
        identity.username,
        req.title,
        req.content,
        normalize_category(req.category),
    );
    post.validate()?;

    let saved = state.posts.insert(post).await?;

    Ok(HttpResponse::Created().json(post_to_response(saved)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let post_id = path.into_inner();
    let mut post = authz::require_post_owner(state.posts.as_ref(), post_id, &identity).await?;

    let req = body.into_inner();
    post.apply_edit(req.title, req.content, normalize_category(req.category));
    post.validate()?;

    let saved = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(post_to_response(saved)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    authz::require_active(&identity)?;

    let post_id = path.into_inner();
    authz::require_post_owner(state.posts.as_ref(), post_id, &identity).await?;

    state.posts.delete(post_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::TimeDelta;

    use quill_core::domain::Role;
    use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

    use crate::handlers::configure_routes;
    use crate::testing::{app_data, bearer, post_by};

    #[actix_web::test]
    async fn list_is_sorted_by_modification_time_descending() {
        let mut oldest = post_by("alice", "Oldest", None);
        oldest.modified_at -= TimeDelta::minutes(10);
        let mut middle = post_by("alice", "Middle", Some("code"));
        middle.modified_at -= TimeDelta::minutes(5);
        let newest = post_by("bob", "Newest", None);

        let (state, tokens) = app_data(vec![oldest, middle, newest]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<PostResponse> = test::read_body_json(resp).await;
        let titles: Vec<_> = body.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[actix_web::test]
    async fn list_filters_by_exact_category() {
        let (state, tokens) = app_data(vec![
            post_by("alice", "Tagged", Some("code")),
            post_by("alice", "Other", Some("life")),
            post_by("alice", "Untagged", None),
        ]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/posts?category=code")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<PostResponse> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].title, "Tagged");

        let req = test::TestRequest::get()
            .uri("/api/posts?category=missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Vec<PostResponse> = test::read_body_json(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn get_unknown_post_is_not_found() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_stamps_server_assigned_fields() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer("alice", Role::Member, false))
            .set_json(CreatePostRequest {
                title: "Hello".to_string(),
                content: "World".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.title, "Hello");
        assert_eq!(body.author, "alice");
        assert!(body.comments.is_empty());
    }

    #[actix_web::test]
    async fn create_requires_authentication() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(CreatePostRequest {
                title: "Hello".to_string(),
                content: "World".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blocked_account_cannot_create() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer("mallory", Role::Member, true))
            .set_json(CreatePostRequest {
                title: "Hello".to_string(),
                content: "World".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn create_with_blank_title_is_a_validation_error() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer("alice", Role::Member, false))
            .set_json(CreatePostRequest {
                title: "   ".to_string(),
                content: "World".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_with_missing_fields_is_a_bad_request() {
        let (state, tokens) = app_data(vec![]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer("alice", Role::Member, false))
            .set_json(serde_json::json!({ "content": "no title" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn owner_update_is_visible_on_subsequent_get() {
        let post = post_by("alice", "Before", None);
        let post_id = post.id;

        let (state, tokens) = app_data(vec![post]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer("alice", Role::Member, false))
            .set_json(UpdatePostRequest {
                title: "After".to_string(),
                content: "Content".to_string(),
                category: Some("code".to_string()),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.title, "After");
        assert_eq!(body.category.as_deref(), Some("code"));
    }

    #[actix_web::test]
    async fn non_owner_update_is_forbidden_and_post_unchanged() {
        let post = post_by("alice", "Before", None);
        let post_id = post.id;

        let (state, tokens) = app_data(vec![post]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer("bob", Role::Member, false))
            .set_json(UpdatePostRequest {
                title: "Hijacked".to_string(),
                content: "Content".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: PostResponse = test::read_body_json(resp).await;
        assert_eq!(body.title, "Before");
    }

    #[actix_web::test]
    async fn administrator_may_update_any_post() {
        let post = post_by("alice", "Before", None);
        let post_id = post.id;

        let (state, tokens) = app_data(vec![post]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer("root", Role::Administrator, false))
            .set_json(UpdatePostRequest {
                title: "Moderated".to_string(),
                content: "Content".to_string(),
                category: None,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn owner_delete_then_get_is_not_found() {
        let post = post_by("alice", "Doomed", None);
        let post_id = post.id;

        let (state, tokens) = app_data(vec![post]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer("alice", Role::Member, false))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn non_owner_delete_is_forbidden() {
        let post = post_by("alice", "Safe", None);
        let post_id = post.id;

        let (state, tokens) = app_data(vec![post]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}"))
            .insert_header(bearer("bob", Role::Member, false))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
