//! Post use cases: cursor-paginated listing, CRUD, and tag discovery.

use std::sync::Arc;

use pagination::{Cursor, DEFAULT_PAGE_SIZE, Page};
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Error, NewPost, Post, PostEdit, PostListQuery, RecordId, UserId};

fn map_repository_error(error: PostRepositoryError) -> Error {
    Error::internal(format!("post repository error: {error}"))
}

/// Filters accepted by [`PostService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListRequest {
    /// Opaque cursor from a previous page. Empty means the first page.
    pub cursor: Option<String>,
    /// Only posts by this user.
    pub user_id: Option<UserId>,
    /// Only posts carrying this tag.
    pub tag: Option<String>,
}

/// Service for post use cases.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    /// Create the service over a post repository.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// One page of live posts by descending id.
    ///
    /// The page starts at the cursor's key inclusive, so the boundary row of
    /// one page is the first row of the next.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::CursorDecoding`] for a cursor this service
    /// did not issue; internal errors for repository failures.
    pub async fn list(&self, request: PostListRequest) -> Result<Page<Post>, Error> {
        let upper_bound = match request.cursor.as_deref() {
            None | Some("") => None,
            Some(token) => Some(decode_cursor(token)?),
        };
        let query = PostListQuery {
            upper_bound,
            user_id: request.user_id,
            tag: request.tag.filter(|tag| !tag.is_empty()),
            limit: DEFAULT_PAGE_SIZE + 1,
        };
        let rows = self
            .posts
            .list(&query)
            .await
            .map_err(map_repository_error)?;
        Ok(Page::from_overfetched(rows, DEFAULT_PAGE_SIZE, |post| {
            post.id.as_cursor_key()
        }))
    }

    /// Fetch a live post.
    ///
    /// # Errors
    ///
    /// Not found when no live post has the id.
    pub async fn get(&self, id: RecordId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Not found"))
    }

    /// Insert a post.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn create(&self, post: NewPost) -> Result<Post, Error> {
        let created = self
            .posts
            .insert(&post)
            .await
            .map_err(map_repository_error)?;
        debug!(post_id = %created.id, "post created");
        Ok(created)
    }

    /// Replace the title and body of a live post.
    ///
    /// # Errors
    ///
    /// Not found when no live post has the id.
    pub async fn update(&self, id: RecordId, edit: PostEdit) -> Result<Post, Error> {
        self.posts
            .update(id, &edit)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Not found"))
    }

    /// Soft-delete a post previously fetched from the store.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::DeleteIsMissingId`] when the post has no
    /// identity.
    pub async fn delete(&self, post: &Post) -> Result<(), Error> {
        if post.id.is_unset() {
            return Err(Error::delete_is_missing_id());
        }
        self.posts
            .soft_delete(post.id)
            .await
            .map_err(map_repository_error)?;
        debug!(post_id = %post.id, "post deleted");
        Ok(())
    }

    /// Distinct tags across live posts.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn tags(&self) -> Result<Vec<String>, Error> {
        self.posts
            .distinct_tags()
            .await
            .map_err(map_repository_error)
    }
}

fn decode_cursor(token: &str) -> Result<RecordId, Error> {
    let cursor = Cursor::decode(token).map_err(|_| Error::cursor_decoding())?;
    RecordId::from_cursor_key(cursor.key()).ok_or_else(Error::cursor_decoding)
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
