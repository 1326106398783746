//! PostgreSQL-backed `SaveRepository`.
//!
//! `insert_if_absent` relies on the `post_saves_post_user_key` unique
//! constraint: the conflicting insert returns no row instead of failing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SaveRepository, SaveRepositoryError};
use crate::domain::{NewPostSave, PostSave, RecordId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSaveRow, SaveRow};
use super::pool::{DbPool, PoolError};
use super::schema::post_saves;

/// Diesel-backed implementation of the save repository port.
#[derive(Clone)]
pub struct DieselSaveRepository {
    pool: DbPool,
}

impl DieselSaveRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SaveRepositoryError {
    map_basic_pool_error(error, SaveRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SaveRepositoryError {
    map_basic_diesel_error(
        error,
        SaveRepositoryError::query,
        SaveRepositoryError::connection,
    )
}

fn row_to_save(row: SaveRow) -> Result<PostSave, SaveRepositoryError> {
    PostSave::try_from(row).map_err(|err| SaveRepositoryError::query(err.to_string()))
}

#[async_trait]
impl SaveRepository for DieselSaveRepository {
    async fn insert_if_absent(
        &self,
        save: &NewPostSave,
    ) -> Result<Option<PostSave>, SaveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSaveRow {
            user_id: save.user_id.as_ref(),
            post_id: save.post_id.get(),
        };
        let inserted = diesel::insert_into(post_saves::table)
            .values(&row)
            .on_conflict((post_saves::post_id, post_saves::user_id))
            .do_nothing()
            .returning(SaveRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        inserted.map(row_to_save).transpose()
    }

    async fn revive(&self, save: &NewPostSave) -> Result<Option<PostSave>, SaveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = save.post_id.get();
        let user_id = save.user_id.as_ref();

        diesel::update(
            post_saves::table
                .filter(post_saves::post_id.eq(post_id))
                .filter(post_saves::user_id.eq(user_id))
                .filter(post_saves::deleted_at.is_not_null()),
        )
        .set((
            post_saves::deleted_at.eq(None::<DateTime<Utc>>),
            post_saves::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let row = post_saves::table
            .filter(post_saves::post_id.eq(post_id))
            .filter(post_saves::user_id.eq(user_id))
            .select(SaveRow::as_select())
            .first::<SaveRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_save).transpose()
    }

    async fn find_any_by_id(&self, id: RecordId) -> Result<Option<PostSave>, SaveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = post_saves::table
            .filter(post_saves::id.eq(id.get()))
            .select(SaveRow::as_select())
            .first::<SaveRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_save).transpose()
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), SaveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            post_saves::table
                .filter(post_saves::id.eq(id.get()))
                .filter(post_saves::deleted_at.is_null()),
        )
        .set(post_saves::deleted_at.eq(Some(Utc::now())))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn list_for_post(&self, post_id: RecordId) -> Result<Vec<PostSave>, SaveRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = post_saves::table
            .filter(post_saves::post_id.eq(post_id.get()))
            .filter(post_saves::deleted_at.is_null())
            .order(post_saves::id.desc())
            .select(SaveRow::as_select())
            .load::<SaveRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_save).collect()
    }
}
