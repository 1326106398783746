//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{NewComment, PostComment, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

/// Port for reading and writing comments. Reads ignore soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment and return it with its assigned identity.
    async fn insert(&self, comment: &NewComment) -> Result<PostComment, CommentRepositoryError>;

    /// Replace the body of a live comment; `None` when it does not exist.
    async fn update(
        &self,
        id: RecordId,
        body: &str,
    ) -> Result<Option<PostComment>, CommentRepositoryError>;

    /// Mark a comment deleted.
    async fn soft_delete(&self, id: RecordId) -> Result<(), CommentRepositoryError>;

    /// Find a live comment by id.
    async fn find_by_id(&self, id: RecordId)
    -> Result<Option<PostComment>, CommentRepositoryError>;

    /// Live comments on a post, newest first.
    async fn list_for_post(
        &self,
        post_id: RecordId,
    ) -> Result<Vec<PostComment>, CommentRepositoryError>;
}
