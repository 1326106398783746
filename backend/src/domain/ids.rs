//! Identifier newtypes shared by every entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for identifier newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Record identities are never negative.
    #[error("record id must not be negative")]
    NegativeRecordId,
    /// User identifiers must contain a non-whitespace character.
    #[error("user id must not be empty")]
    EmptyUserId,
}

/// Numeric identity of a stored record.
///
/// `0` is the unset identity of a record that has not been persisted.
///
/// # Examples
/// ```
/// use postms::domain::RecordId;
///
/// assert_eq!(RecordId::parse_segment("42"), Some(RecordId::new(42).unwrap()));
/// assert_eq!(RecordId::parse_segment("-1"), None);
/// assert!(RecordId::UNSET.is_unset());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RecordId(i64);

impl RecordId {
    /// Identity of a record that has not been persisted.
    pub const UNSET: Self = Self(0);

    /// Validate a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`IdValidationError::NegativeRecordId`] for negative keys.
    pub fn new(raw: i64) -> Result<Self, IdValidationError> {
        if raw < 0 {
            return Err(IdValidationError::NegativeRecordId);
        }
        Ok(Self(raw))
    }

    /// Parse a URL path segment made only of ASCII digits.
    ///
    /// Signs, whitespace, and values beyond the signed 64-bit range yield
    /// `None`.
    #[must_use]
    pub fn parse_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        segment.parse::<i64>().ok().map(Self)
    }

    /// Rebuild an identity from a pagination cursor key.
    #[must_use]
    pub fn from_cursor_key(key: u64) -> Option<Self> {
        i64::try_from(key).ok().map(Self)
    }

    /// Key used when encoding a pagination cursor.
    #[must_use]
    pub fn as_cursor_key(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Raw database key.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }

    /// Whether this is the unset identity.
    #[must_use]
    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for RecordId {
    type Error = IdValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

/// Opaque identifier of the user acting on a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`IdValidationError::EmptyUserId`] for blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdValidationError::EmptyUserId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
