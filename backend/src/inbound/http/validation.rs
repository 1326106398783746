//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies and query strings are decoded leniently (every field
//! optional) and then checked here so every failure reports the same way.

use serde::de::DeserializeOwned;

use crate::domain::{Error, RecordId, UserId};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("missing required field: {}", field.as_str()))
}

pub(crate) fn invalid_field_error(field: FieldName, reason: &str) -> Error {
    Error::invalid_request(format!("{} {reason}", field.as_str()))
}

/// Require a present, non-blank string.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing_field_error(field)),
    }
}

pub(crate) fn require_user_id(value: Option<String>, field: FieldName) -> Result<UserId, Error> {
    let text = require_text(value, field)?;
    UserId::new(text).map_err(|_| missing_field_error(field))
}

/// Require a present, positive record id.
pub(crate) fn require_record_id(value: Option<i64>, field: FieldName) -> Result<RecordId, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    match RecordId::new(raw) {
        Ok(id) if !id.is_unset() => Ok(id),
        Ok(_) => Err(missing_field_error(field)),
        Err(_) => Err(invalid_field_error(field, "must not be negative")),
    }
}

pub(crate) fn require_value(value: Option<i64>, field: FieldName) -> Result<i64, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Decode a JSON request body.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("invalid JSON body: {err}")))
}

/// Decode a URL query string.
pub(crate) fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, Error> {
    actix_web::web::Query::<T>::from_query(query)
        .map(actix_web::web::Query::into_inner)
        .map_err(|err| Error::invalid_request(format!("invalid query string: {err}")))
}
