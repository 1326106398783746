//! Port for post persistence and listing.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostEdit, PostListQuery, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Port for reading and writing posts.
///
/// Every read ignores soft-deleted posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return it with its assigned identity.
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Replace the title, slug and body of a live post.
    ///
    /// Returns `None` when no live post has the id.
    async fn update(
        &self,
        id: RecordId,
        edit: &PostEdit,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Mark a post deleted. Deleting an already-deleted post is a no-op.
    async fn soft_delete(&self, id: RecordId) -> Result<(), PostRepositoryError>;

    /// Find a live post by id.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Post>, PostRepositoryError>;

    /// List live posts by descending id, applying every filter in `query`.
    async fn list(&self, query: &PostListQuery) -> Result<Vec<Post>, PostRepositoryError>;

    /// Distinct tags across live posts, sorted ascending.
    async fn distinct_tags(&self) -> Result<Vec<String>, PostRepositoryError>;
}
