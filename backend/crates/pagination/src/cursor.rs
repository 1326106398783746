//! Opaque cursor codec.
//!
//! The token is the URL-safe, unpadded base64 encoding of the key's decimal
//! representation. Decoding accepts only canonical decimal digits so every
//! malformed token collapses into a single [`CursorError::Malformed`] kind.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Errors raised while decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token was not produced by [`Cursor::from_key`].
    #[error("unable to decode cursor")]
    Malformed,
}

/// Opaque pagination token carrying a primary-key boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    key: u64,
    encoded: String,
}

impl Cursor {
    /// Build a cursor for the given key.
    #[must_use]
    pub fn from_key(key: u64) -> Self {
        Self {
            key,
            encoded: URL_SAFE_NO_PAD.encode(key.to_string()),
        }
    }

    /// Decode a token previously produced by [`Cursor::encoded`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Malformed`] when the token is not valid base64,
    /// is not UTF-8, or does not hold a canonical unsigned decimal key.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CursorError::Malformed)?;
        let digits = std::str::from_utf8(&bytes).map_err(|_| CursorError::Malformed)?;
        let key = parse_canonical_key(digits).ok_or(CursorError::Malformed)?;
        Ok(Self {
            key,
            encoded: token.to_owned(),
        })
    }

    /// Boundary key carried by the cursor.
    #[must_use]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Encoded token suitable for a URL query value.
    #[must_use]
    pub fn encoded(&self) -> &str {
        self.encoded.as_str()
    }

    /// Consume the cursor and return the encoded token.
    #[must_use]
    pub fn into_encoded(self) -> String {
        self.encoded
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encoded)
    }
}

// `u64::from_str` tolerates a leading `+` and leading zeros; neither is ever
// emitted by the encoder.
fn parse_canonical_key(digits: &str) -> Option<u64> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|byte| byte.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if canonical { digits.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(100)]
    #[case(9_007_199_254_740_993)]
    #[case(u64::MAX)]
    fn decode_inverts_encode(#[case] key: u64) {
        let cursor = Cursor::from_key(key);
        let decoded = Cursor::decode(cursor.encoded()).expect("encoded cursor decodes");
        assert_eq!(decoded.key(), key);
        assert_eq!(decoded, cursor);
    }

    #[rstest]
    #[case("not-a-valid-token")]
    #[case("")]
    #[case("!!!!")]
    #[case("YWJj")] // "abc"
    #[case("LTE")] // "-1"
    #[case("KzE")] // "+1"
    #[case("MDE")] // "01"
    #[case("MTg0NDY3NDQwNzM3MDk1NTE2MTY")] // u64::MAX + 1
    fn decode_rejects_foreign_tokens(#[case] token: &str) {
        assert_eq!(Cursor::decode(token), Err(CursorError::Malformed));
    }

    #[rstest]
    fn decode_rejects_non_utf8_payloads() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe]);
        assert_eq!(Cursor::decode(&token), Err(CursorError::Malformed));
    }

    #[rstest]
    #[case(0)]
    #[case(62)]
    #[case(u64::MAX)]
    fn encoded_cursor_is_query_safe(#[case] key: u64) {
        let cursor = Cursor::from_key(key);
        let escaped: String = url::form_urlencoded::byte_serialize(cursor.encoded().as_bytes())
            .collect();
        assert_eq!(escaped, cursor.encoded());
    }

    #[rstest]
    fn error_message_is_stable() {
        assert_eq!(CursorError::Malformed.to_string(), "unable to decode cursor");
    }
}
