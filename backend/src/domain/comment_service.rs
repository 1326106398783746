//! Comment use cases.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, PostRepository, PostRepositoryError,
};
use crate::domain::{Error, NewComment, PostComment, RecordId};

fn map_comment_error(error: CommentRepositoryError) -> Error {
    Error::internal(format!("comment repository error: {error}"))
}

fn map_post_error(error: PostRepositoryError) -> Error {
    Error::internal(format!("post repository error: {error}"))
}

/// Service for comment use cases.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    /// Create the service; posts are consulted to validate comment parents.
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    /// Insert a comment on a live post.
    ///
    /// # Errors
    ///
    /// Invalid request when the parent post does not exist.
    pub async fn create(&self, comment: NewComment) -> Result<PostComment, Error> {
        let parent = self
            .posts
            .find_by_id(comment.post_id)
            .await
            .map_err(map_post_error)?;
        if parent.is_none() {
            return Err(Error::invalid_request(
                "Can not create comment for non-existent post",
            ));
        }
        let created = self
            .comments
            .insert(&comment)
            .await
            .map_err(map_comment_error)?;
        debug!(comment_id = %created.id, post_id = %created.post_id, "comment created");
        Ok(created)
    }

    /// Fetch a live comment.
    ///
    /// # Errors
    ///
    /// Not found when no live comment has the id.
    pub async fn get(&self, id: RecordId) -> Result<PostComment, Error> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("Not found"))
    }

    /// Replace a comment body.
    ///
    /// # Errors
    ///
    /// Not found when no live comment has the id.
    pub async fn update(&self, id: RecordId, body: &str) -> Result<PostComment, Error> {
        self.comments
            .update(id, body)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("Not found"))
    }

    /// Soft-delete a comment previously fetched from the store.
    ///
    /// # Errors
    ///
    /// Delete-is-missing-id when the comment has no identity.
    pub async fn delete(&self, comment: &PostComment) -> Result<(), Error> {
        if comment.id.is_unset() {
            return Err(Error::delete_is_missing_id());
        }
        self.comments
            .soft_delete(comment.id)
            .await
            .map_err(map_comment_error)
    }

    /// Live comments on a post, newest first. Unknown posts yield an empty list.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn list_for_post(&self, post_id: RecordId) -> Result<Vec<PostComment>, Error> {
        self.comments
            .list_for_post(post_id)
            .await
            .map_err(map_comment_error)
    }
}
