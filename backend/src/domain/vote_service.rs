//! Vote use cases.

use std::sync::Arc;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{Error, NewVote, PostVote, RecordId, UserId};

fn map_repository_error(error: VoteRepositoryError) -> Error {
    Error::internal(format!("vote repository error: {error}"))
}

/// Service for casting and aggregating votes.
#[derive(Clone)]
pub struct VoteService {
    votes: Arc<dyn VoteRepository>,
}

impl VoteService {
    /// Create the service over a vote repository.
    pub fn new(votes: Arc<dyn VoteRepository>) -> Self {
        Self { votes }
    }

    /// Cast a vote; the stored value is always `1` or `-1`.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn cast(
        &self,
        post_id: RecordId,
        user_id: UserId,
        raw_value: i64,
    ) -> Result<PostVote, Error> {
        let vote = NewVote::new(post_id, user_id, raw_value);
        self.votes.upsert(&vote).await.map_err(map_repository_error)
    }

    /// Sum of votes on a post.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn total_for_post(&self, post_id: RecordId) -> Result<i64, Error> {
        self.votes
            .total_for_post(post_id)
            .await
            .map_err(map_repository_error)
    }

    /// Distinct voters on a post.
    ///
    /// # Errors
    ///
    /// Internal errors for repository failures.
    pub async fn voters_for_post(&self, post_id: RecordId) -> Result<Vec<UserId>, Error> {
        self.votes
            .voters_for_post(post_id)
            .await
            .map_err(map_repository_error)
    }
}
