//! PostgreSQL-backed `VoteRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{NewVote, PostVote, RecordId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::post_votes;

/// Diesel-backed implementation of the vote repository port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteRepositoryError {
    map_basic_pool_error(error, VoteRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoteRepositoryError {
    map_basic_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn upsert(&self, vote: &NewVote) -> Result<PostVote, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewVoteRow {
            post_id: vote.post_id().get(),
            user_id: vote.user_id().as_ref(),
            value: vote.value(),
            created_at: Utc::now(),
        };

        let stored = diesel::insert_into(post_votes::table)
            .values(&row)
            .on_conflict((post_votes::post_id, post_votes::user_id))
            .do_update()
            .set((
                post_votes::value.eq(excluded(post_votes::value)),
                post_votes::created_at.eq(excluded(post_votes::created_at)),
            ))
            .returning(VoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        PostVote::try_from(stored).map_err(|err| VoteRepositoryError::query(err.to_string()))
    }

    async fn total_for_post(&self, post_id: RecordId) -> Result<i64, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total = post_votes::table
            .filter(post_votes::post_id.eq(post_id.get()))
            .select(diesel::dsl::sum(post_votes::value))
            .first::<Option<i64>>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(total.unwrap_or(0))
    }

    async fn voters_for_post(&self, post_id: RecordId) -> Result<Vec<UserId>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let voters = post_votes::table
            .filter(post_votes::post_id.eq(post_id.get()))
            .select(post_votes::user_id)
            .distinct()
            .order(post_votes::user_id.asc())
            .load::<String>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        voters
            .into_iter()
            .map(|raw| UserId::new(raw).map_err(|err| VoteRepositoryError::query(err.to_string())))
            .collect()
    }
}
