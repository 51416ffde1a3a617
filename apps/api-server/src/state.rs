//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_infra::DatabaseConfig;
use uuid::Uuid;

#[cfg(feature = "postgres")]
use quill_infra::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

/// In-memory post repository for when the database is not configured.
pub struct InMemoryPostRepository;

#[async_trait::async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        tracing::warn!("Database not configured - using in-memory fallback");
        Ok(None)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        Ok(post)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, _category: Option<&str>) -> Result<Vec<Post>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_by_comment_id(&self, _comment_id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(None)
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostRepository> = {
            if let Some(config) = db_config {
                match quill_infra::database::connect(config).await {
                    Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryPostRepository)
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostRepository> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository)
        };

        tracing::info!("Application state initialized");

        Self { posts }
    }
}
