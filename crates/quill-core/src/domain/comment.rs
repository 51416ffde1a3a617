use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - embedded in exactly one post.
///
/// The id is assigned when the comment is appended to a post and is stable
/// for the comment's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: String,
    pub body: String,
}

impl Comment {
    /// Create a new comment with a generated ID.
    pub fn new(author: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            body,
        }
    }
}
