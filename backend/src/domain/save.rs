//! Bookmarks of posts by users.
//!
//! A save is unique per `(post_id, user_id)` for its whole history: deleting
//! one marks it, and saving again revives the same row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RecordId, UserId};

/// A stored save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSave {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker, never serialised.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Saving user.
    pub user_id: UserId,
    /// Saved post.
    pub post_id: RecordId,
}

impl PostSave {
    /// Whether the save is currently soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The `(post, user)` pair to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostSave {
    /// Saved post.
    pub post_id: RecordId,
    /// Saving user.
    pub user_id: UserId,
}

/// Result of a save create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The live save.
    pub save: PostSave,
    /// `true` when a new row was inserted, `false` when one was returned or
    /// revived.
    pub created: bool,
}
