use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::DomainError;

/// Post entity - a blog post with its embedded comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a new post with generated ID, server-stamped timestamps and an
    /// empty comment list.
    pub fn new(author: String, title: String, content: String, category: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author,
            title,
            content,
            category,
            created_at: now,
            modified_at: now,
            comments: Vec::new(),
        }
    }

    /// Check that all required fields are non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.author.trim().is_empty() {
            return Err(DomainError::Validation("author is required".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".to_string()));
        }
        Ok(())
    }

    /// Replace the editable fields and touch the modification timestamp.
    pub fn apply_edit(&mut self, title: String, content: String, category: Option<String>) {
        self.title = title;
        self.content = content;
        self.category = category;
        self.touch();
    }

    /// Append a comment and return its freshly assigned id.
    ///
    /// Comment mutations count as alterations of the post, so the
    /// modification timestamp is touched as well.
    pub fn add_comment(&mut self, author: String, body: String) -> Uuid {
        let comment = Comment::new(author, body);
        let comment_id = comment.id;
        self.comments.push(comment);
        self.touch();
        comment_id
    }

    /// Remove the comment with the given id, returning it.
    pub fn remove_comment(&mut self, comment_id: Uuid) -> Result<Comment, DomainError> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or(DomainError::NotFound {
                entity_type: "comment",
                id: comment_id,
            })?;

        let removed = self.comments.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Look up an embedded comment by id.
    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}
