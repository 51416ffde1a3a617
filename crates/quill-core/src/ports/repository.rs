use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Create and update are separate operations: entities carry their primary
/// key from construction, so the store cannot infer intent from a missing
/// key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if the
    /// ID does not resolve.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// List posts ordered by modification time, newest first, optionally
    /// restricted to an exact category match.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Find the post whose embedded comment list contains the given comment
    /// id.
    async fn find_by_comment_id(&self, comment_id: Uuid) -> Result<Option<Post>, RepoError>;
}
