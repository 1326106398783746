//! Port for post saves.
//!
//! Adapters must back `(post_id, user_id)` with a uniqueness guarantee so
//! that [`SaveRepository::insert_if_absent`] never inserts a second row for a
//! pair, whether or not the existing row is soft-deleted.

use async_trait::async_trait;

use crate::domain::{NewPostSave, PostSave, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by save repository adapters.
    pub enum SaveRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "save repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "save repository query failed: {message}",
    }
}

/// Port for creating, reviving and deleting saves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaveRepository: Send + Sync {
    /// Insert a save unless any row exists for the pair.
    ///
    /// Returns `None` on conflict.
    async fn insert_if_absent(
        &self,
        save: &NewPostSave,
    ) -> Result<Option<PostSave>, SaveRepositoryError>;

    /// Clear the deletion marker of the pair's row and return it.
    ///
    /// A live row is returned unchanged. `None` when no row exists.
    async fn revive(&self, save: &NewPostSave) -> Result<Option<PostSave>, SaveRepositoryError>;

    /// Find a save by id, including soft-deleted rows.
    async fn find_any_by_id(&self, id: RecordId) -> Result<Option<PostSave>, SaveRepositoryError>;

    /// Mark a save deleted, keeping the first deletion time on repeats.
    async fn soft_delete(&self, id: RecordId) -> Result<(), SaveRepositoryError>;

    /// Live saves of a post, newest first.
    async fn list_for_post(&self, post_id: RecordId) -> Result<Vec<PostSave>, SaveRepositoryError>;
}
