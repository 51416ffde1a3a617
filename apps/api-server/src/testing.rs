//! Test support - an in-memory post repository and request helpers.

use std::sync::{Arc, Mutex};

use actix_web::http::header;
use actix_web::web;
use async_trait::async_trait;
use uuid::Uuid;

use quill_core::domain::{Post, Role};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, TokenService};
use quill_infra::auth::{JwtConfig, JwtTokenService};

use crate::state::AppState;

/// In-memory `PostRepository` backing handler and guard tests.
#[derive(Default)]
pub struct TestPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl TestPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
        }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for TestPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        self.posts.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for TestPostRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.map_or(true, |c| p.category.as_deref() == Some(c)))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(posts)
    }

    async fn find_by_comment_id(&self, comment_id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.find_comment(comment_id).is_some())
            .cloned())
    }
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "test".to_string(),
    }
}

/// Authorization header carrying a freshly minted test token.
pub fn bearer(username: &str, role: Role, blocked: bool) -> (header::HeaderName, String) {
    let token = JwtTokenService::new(jwt_config())
        .generate_token(username, role, blocked)
        .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// App data pair (state + token verifier) over an in-memory repository.
pub fn app_data(posts: Vec<Post>) -> (web::Data<AppState>, web::Data<Arc<dyn TokenService>>) {
    let state = web::Data::new(AppState {
        posts: Arc::new(TestPostRepository::with_posts(posts)),
    });
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt_config()));
    (state, web::Data::new(tokens))
}

/// A minimal post by the given author.
pub fn post_by(author: &str, title: &str, category: Option<&str>) -> Post {
    Post::new(
        author.to_string(),
        title.to_string(),
        "Content".to_string(),
        category.map(str::to_string),
    )
}
