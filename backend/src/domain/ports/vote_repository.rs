//! Port for vote persistence and aggregation.

use async_trait::async_trait;

use crate::domain::{NewVote, PostVote, RecordId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
    }
}

/// Port for casting votes and reading their aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Store a vote, replacing the value of an earlier vote by the same user.
    async fn upsert(&self, vote: &NewVote) -> Result<PostVote, VoteRepositoryError>;

    /// Sum of vote values on a post; `0` when there are none.
    async fn total_for_post(&self, post_id: RecordId) -> Result<i64, VoteRepositoryError>;

    /// Distinct users that voted on a post, sorted ascending.
    async fn voters_for_post(&self, post_id: RecordId) -> Result<Vec<UserId>, VoteRepositoryError>;
}
