//! Post entity for SeaORM.
//!
//! Comments are not a table of their own: each post carries its comment
//! list in a single JSONB column, so comment mutations rewrite the whole
//! list in one UPDATE.

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub modified_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: CommentList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Embedded comment list as persisted in the `comments` column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CommentList(pub Vec<CommentRecord>);

/// One embedded comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub author: String,
    pub body: String,
}

impl From<CommentRecord> for quill_core::domain::Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            author: record.author,
            body: record.body,
        }
    }
}

impl From<quill_core::domain::Comment> for CommentRecord {
    fn from(comment: quill_core::domain::Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            body: comment.body,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: model.author,
            title: model.title,
            content: model.content,
            category: model.category,
            created_at: model.created_at.into(),
            modified_at: model.modified_at.into(),
            comments: model.comments.0.into_iter().map(Into::into).collect(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author: Set(post.author),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            created_at: Set(post.created_at.into()),
            modified_at: Set(post.modified_at.into()),
            comments: Set(CommentList(
                post.comments.into_iter().map(Into::into).collect(),
            )),
        }
    }
}
