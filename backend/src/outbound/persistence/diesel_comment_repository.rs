//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{NewComment, PostComment, RecordId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::post_comments;

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(row: CommentRow) -> Result<PostComment, CommentRepositoryError> {
    PostComment::try_from(row).map_err(|err| CommentRepositoryError::query(err.to_string()))
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &NewComment) -> Result<PostComment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCommentRow {
            user_id: comment.user_id.as_ref(),
            post_id: comment.post_id.get(),
            body: &comment.body,
        };
        let inserted = diesel::insert_into(post_comments::table)
            .values(&row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_comment(inserted)
    }

    async fn update(
        &self,
        id: RecordId,
        body: &str,
    ) -> Result<Option<PostComment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            post_comments::table
                .filter(post_comments::id.eq(id.get()))
                .filter(post_comments::deleted_at.is_null()),
        )
        .set((
            post_comments::body.eq(body),
            post_comments::updated_at.eq(Utc::now()),
        ))
        .returning(CommentRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        updated.map(row_to_comment).transpose()
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            post_comments::table
                .filter(post_comments::id.eq(id.get()))
                .filter(post_comments::deleted_at.is_null()),
        )
        .set(post_comments::deleted_at.eq(Some(Utc::now())))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: RecordId,
    ) -> Result<Option<PostComment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = post_comments::table
            .filter(post_comments::id.eq(id.get()))
            .filter(post_comments::deleted_at.is_null())
            .select(CommentRow::as_select())
            .first::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_comment).transpose()
    }

    async fn list_for_post(
        &self,
        post_id: RecordId,
    ) -> Result<Vec<PostComment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = post_comments::table
            .filter(post_comments::post_id.eq(post_id.get()))
            .filter(post_comments::deleted_at.is_null())
            .order(post_comments::id.desc())
            .select(CommentRow::as_select())
            .load::<CommentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_comment).collect()
    }
}
