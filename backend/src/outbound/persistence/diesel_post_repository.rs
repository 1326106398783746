//! PostgreSQL-backed `PostRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{NewPost, Post, PostEdit, PostListQuery, RecordId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostEditRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

const DISTINCT_TAGS_SQL: &str = "SELECT DISTINCT unnest(tags) AS tag \
     FROM posts WHERE deleted_at IS NULL ORDER BY tag";

#[derive(QueryableByName)]
struct TagRow {
    #[diesel(sql_type = Text)]
    tag: String,
}

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    Post::try_from(row).map_err(|err| PostRepositoryError::query(err.to_string()))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            user_id: post.user_id().as_ref(),
            title: post.title(),
            slug: post.slug(),
            body: post.body(),
            tags: post.tags(),
        };

        let inserted = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_post(inserted)
    }

    async fn update(
        &self,
        id: RecordId,
        edit: &PostEdit,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostEditRow {
            title: edit.title(),
            slug: edit.slug(),
            body: edit.body(),
            updated_at: Utc::now(),
        };

        let updated = diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::deleted_at.is_null()),
        )
        .set(&changes)
        .returning(PostRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        updated.map(row_to_post).transpose()
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::deleted_at.is_null()),
        )
        .set(posts::deleted_at.eq(Some(Utc::now())))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = posts::table
            .filter(posts::id.eq(id.get()))
            .filter(posts::deleted_at.is_null())
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_post).transpose()
    }

    async fn list(&self, query: &PostListQuery) -> Result<Vec<Post>, PostRepositoryError> {
        let limit = i64::try_from(query.limit)
            .map_err(|_| PostRepositoryError::query("requested limit exceeds i64 range"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = posts::table
            .filter(posts::deleted_at.is_null())
            .select(PostRow::as_select())
            .order(posts::id.desc())
            .into_boxed();
        if let Some(bound) = query.upper_bound {
            statement = statement.filter(posts::id.le(bound.get()));
        }
        if let Some(user_id) = &query.user_id {
            statement = statement.filter(posts::user_id.eq(user_id.as_ref().to_owned()));
        }
        if let Some(tag) = &query.tag {
            statement = statement.filter(posts::tags.contains(vec![tag.clone()]));
        }

        let rows = statement
            .limit(limit)
            .load::<PostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_post).collect()
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = diesel::sql_query(DISTINCT_TAGS_SQL)
            .load::<TagRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(|row| row.tag).collect())
    }
}
