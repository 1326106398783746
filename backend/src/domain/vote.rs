//! Up and down votes on posts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RecordId, UserId};

/// A stored vote, keyed by `(post_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVote {
    /// Time the vote was last cast.
    pub created_at: DateTime<Utc>,
    /// Voter.
    pub user_id: UserId,
    /// Post voted on.
    pub post_id: RecordId,
    /// Either `1` or `-1`.
    pub value: i32,
}

/// A vote ready to be stored, with its value already normalised.
///
/// # Examples
/// ```
/// use postms::domain::{NewVote, RecordId, UserId};
///
/// let post = RecordId::new(1).unwrap();
/// let user = UserId::new("u1").unwrap();
/// assert_eq!(NewVote::new(post, user.clone(), 57).value(), 1);
/// assert_eq!(NewVote::new(post, user.clone(), 0).value(), 1);
/// assert_eq!(NewVote::new(post, user, -57).value(), -1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    post_id: RecordId,
    user_id: UserId,
    value: i32,
}

impl NewVote {
    /// Build a vote, mapping non-negative input to `1` and negative to `-1`.
    #[must_use]
    pub fn new(post_id: RecordId, user_id: UserId, raw_value: i64) -> Self {
        Self {
            post_id,
            user_id,
            value: normalize_vote(raw_value),
        }
    }

    /// Post voted on.
    pub fn post_id(&self) -> RecordId {
        self.post_id
    }

    /// Voter.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Normalised value.
    pub fn value(&self) -> i32 {
        self.value
    }
}

fn normalize_vote(raw: i64) -> i32 {
    if raw >= 0 { 1 } else { -1 }
}
