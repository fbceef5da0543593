//! # Cursor Codec
//!
//! Owns the opaque continuation token handed to callers. Nothing outside this
//! module parses the token; everything else works with [`CursorKey`].
//!
//! ## Ordering Convention
//!
//! Pages are sorted by `(approved_at DESC, id DESC)`. A key `k` is "after"
//! cursor `c` when `k < c` under the derived ordering, so the id breaks ties
//! between payments approved in the same millisecond.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Payment, PaymentId};
use thiserror::Error;
use tracing::debug;

/// Upper bound on untrusted token length.
pub const MAX_CURSOR_TOKEN_LEN: usize = 256;

const SEPARATOR: char = ':';

/// Errors produced while decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorDecodeError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64")]
    InvalidEncoding,

    #[error("cursor payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("cursor payload is missing the ':' separator")]
    MissingSeparator,

    #[error("cursor timestamp is not a valid epoch-millis value: {0}")]
    InvalidTimestamp(String),

    #[error("cursor id is not numeric: {0}")]
    InvalidId(String),
}

/// Composite keyset position: approval instant plus payment id.
///
/// Timestamps are held at millisecond precision so that a key survives the
/// encode/decode round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CursorKey {
    approved_at: DateTime<Utc>,
    id: PaymentId,
}

impl CursorKey {
    /// Build a key, truncating the timestamp to milliseconds.
    pub fn new(approved_at: DateTime<Utc>, id: PaymentId) -> Self {
        Self {
            approved_at: truncate_to_millis(approved_at),
            id,
        }
    }

    /// Key of an existing payment row.
    pub fn of(payment: &Payment) -> Self {
        Self::new(payment.approved_at, payment.id)
    }

    pub fn approved_at(&self) -> DateTime<Utc> {
        self.approved_at
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    /// Whether `other` sorts strictly after this position (newest first).
    pub fn precedes(&self, other: &CursorKey) -> bool {
        other < self
    }

    /// Decode an optional raw token, folding absent and malformed input into
    /// `None` ("start of set"). Malformed tokens are logged at debug.
    pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
        decode_cursor(raw?)
            .inspect_err(|err| {
                debug!(error = %err, "Discarding undecodable cursor, starting from first page")
            })
            .ok()
    }
}

/// Drop sub-millisecond precision, the resolution of the ordering key.
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}

/// Encode a key into its opaque token.
pub fn encode_cursor(key: &CursorKey) -> String {
    let payload = format!("{}{}{}", key.approved_at.timestamp_millis(), SEPARATOR, key.id);
    STANDARD.encode(payload)
}

/// Decode an opaque token back into a key.
///
/// Surrounding whitespace is trimmed. Never panics on untrusted input.
pub fn decode_cursor(token: &str) -> Result<CursorKey, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = STANDARD
        .decode(token)
        .map_err(|_| CursorDecodeError::InvalidEncoding)?;
    let payload = String::from_utf8(bytes).map_err(|_| CursorDecodeError::InvalidUtf8)?;

    let (millis, id) = payload
        .split_once(SEPARATOR)
        .ok_or(CursorDecodeError::MissingSeparator)?;

    let approved_at = millis
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| CursorDecodeError::InvalidTimestamp(millis.to_string()))?;

    let id = id
        .parse::<PaymentId>()
        .map_err(|_| CursorDecodeError::InvalidId(id.to_string()))?;

    Ok(CursorKey { approved_at, id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_encode_is_base64_of_millis_and_id() {
        let key = CursorKey::new(at(11, 0), 0);
        let token = encode_cursor(&key);

        let raw = STANDARD.decode(&token).unwrap();
        assert_eq!(String::from_utf8(raw).unwrap(), "1704106800000:0");
    }

    #[test]
    fn test_decode_recovers_key() {
        let key = CursorKey::new(at(12, 0), 42);
        assert_eq!(decode_cursor(&encode_cursor(&key)), Ok(key));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let key = CursorKey::new(at(12, 0), 7);
        let token = format!("  {}\n", encode_cursor(&key));
        assert_eq!(decode_cursor(&token), Ok(key));
    }

    #[test]
    fn test_new_truncates_to_millis() {
        let precise = at(12, 0) + chrono::Duration::microseconds(1_500);
        let key = CursorKey::new(precise, 1);
        assert_eq!(key.approved_at(), at(12, 0) + chrono::Duration::milliseconds(1));
    }

    #[test]
    fn test_decode_rejects_empty_and_whitespace() {
        assert_eq!(decode_cursor(""), Err(CursorDecodeError::Empty));
        assert_eq!(decode_cursor(" \t\n"), Err(CursorDecodeError::Empty));
    }

    #[test]
    fn test_decode_rejects_oversized_token() {
        let token = "A".repeat(MAX_CURSOR_TOKEN_LEN + 4);
        assert_eq!(
            decode_cursor(&token),
            Err(CursorDecodeError::TooLong {
                len: MAX_CURSOR_TOKEN_LEN + 4,
                max: MAX_CURSOR_TOKEN_LEN,
            })
        );
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        assert_eq!(
            decode_cursor("invalid-cursor"),
            Err(CursorDecodeError::InvalidEncoding)
        );
    }

    #[test]
    fn test_decode_rejects_missing_separator() {
        let token = STANDARD.encode("1704106800000");
        assert_eq!(decode_cursor(&token), Err(CursorDecodeError::MissingSeparator));
    }

    #[test]
    fn test_decode_rejects_non_numeric_fields() {
        let token = STANDARD.encode("yesterday:1");
        assert!(matches!(
            decode_cursor(&token),
            Err(CursorDecodeError::InvalidTimestamp(_))
        ));

        let token = STANDARD.encode("1704106800000:abc");
        assert_eq!(
            decode_cursor(&token),
            Err(CursorDecodeError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn test_decode_rejects_non_utf8_payload() {
        let token = STANDARD.encode([0xFF, 0xFE, 0x3A, 0x31]);
        assert_eq!(decode_cursor(&token), Err(CursorDecodeError::InvalidUtf8));
    }

    #[test]
    fn test_parse_lenient_folds_errors_into_none() {
        assert_eq!(CursorKey::parse_lenient(None), None);
        assert_eq!(CursorKey::parse_lenient(Some("")), None);
        assert_eq!(CursorKey::parse_lenient(Some("invalid-cursor")), None);

        let key = CursorKey::new(at(9, 30), 3);
        assert_eq!(
            CursorKey::parse_lenient(Some(&encode_cursor(&key))),
            Some(key)
        );
    }

    #[test]
    fn test_ordering_breaks_timestamp_ties_by_id() {
        let newer = CursorKey::new(at(12, 0), 5);
        let same_time_lower_id = CursorKey::new(at(12, 0), 4);
        let older = CursorKey::new(at(11, 59), 99);

        assert!(newer.precedes(&same_time_lower_id));
        assert!(same_time_lower_id.precedes(&older));
        assert!(!newer.precedes(&newer));
    }

    proptest! {
        #[test]
        fn prop_round_trip(millis in -8_000_000_000_000i64..8_000_000_000_000i64, id in any::<i64>()) {
            let approved_at = DateTime::from_timestamp_millis(millis).unwrap();
            let key = CursorKey::new(approved_at, id);
            prop_assert_eq!(decode_cursor(&encode_cursor(&key)), Ok(key));
        }

        #[test]
        fn prop_decode_never_panics(raw in ".{0,300}") {
            let _ = decode_cursor(&raw);
        }
    }
}
