//! Comments attached to posts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RecordId, UserId};

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, never serialised.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Author.
    pub user_id: UserId,
    /// Parent post.
    pub post_id: RecordId,
    /// Comment text.
    pub body: String,
}

/// A comment ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Author.
    pub user_id: UserId,
    /// Parent post.
    pub post_id: RecordId,
    /// Comment text.
    pub body: String,
}
