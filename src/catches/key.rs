//! Catch and mute-reason key encoding.
//!
//! A catch key joins the filter kind, the subject id and the percent-encoded
//! filter value with [`KEY_SEPARATOR`]:
//!
//! ```text
//! BTD_follower_count_less_than$_$1234$_$100
//! ```
//!
//! A mute-reason key is the same without the subject component and groups
//! every catch produced by one `(kind, value)` rule. Kind identifiers never
//! contain `$`, and the value is percent-encoded, so the separator can only
//! appear unescaped as a separator.

use crate::models::{CatchRecord, FilterKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between key components.
pub const KEY_SEPARATOR: &str = "$_$";

/// Bytes left as-is by [`percent_encode`], matching `encodeURIComponent`.
const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
        )
}

/// Percent-encodes every byte of the UTF-8 input outside the unreserved set.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut encoded = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if is_unreserved(byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push('%');
            encoded.push(char::from(HEX[usize::from(byte >> 4)]));
            encoded.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
    }
    encoded
}

/// Decodes a percent-encoded string.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] when an escape is truncated, is not valid
/// hex, or the decoded bytes are not UTF-8.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid_key(input, "malformed percent escape"))?;
            decoded.push(hex);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).map_err(|_| invalid_key(input, "decoded value is not UTF-8"))
}

fn invalid_key(key: &str, reason: &str) -> Error {
    Error::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_kind(key: &str, raw: &str) -> Result<FilterKind> {
    FilterKind::parse(raw).ok_or_else(|| invalid_key(key, "unknown filter kind"))
}

/// Key of one catch: `(kind, subject id, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatchKey(String);

/// Components recovered from a [`CatchKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCatchKey {
    /// Filter kind.
    pub filter_kind: FilterKind,
    /// Subject id.
    pub subject_id: String,
    /// Decoded filter value.
    pub value: String,
}

impl CatchKey {
    /// Derives the key of a record.
    #[must_use]
    pub fn encode(record: &CatchRecord) -> Self {
        Self(
            [
                record.filter_kind.as_str(),
                record.user.id.as_str(),
                &percent_encode(&record.value),
            ]
            .join(KEY_SEPARATOR),
        )
    }

    /// Wraps a raw key string without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key into its components.
    ///
    /// The kind is everything before the first separator and the value
    /// everything after the last one; the subject id is what lies between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key has fewer than two
    /// separators, names an unknown kind, or carries a malformed value.
    pub fn decode(&self) -> Result<DecodedCatchKey> {
        let key = self.as_str();
        let (kind, rest) = key
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| invalid_key(key, "missing separator"))?;
        let (subject_id, value) = rest
            .rsplit_once(KEY_SEPARATOR)
            .ok_or_else(|| invalid_key(key, "missing subject component"))?;

        Ok(DecodedCatchKey {
            filter_kind: parse_kind(key, kind)?,
            subject_id: subject_id.to_string(),
            value: percent_decode(value)?,
        })
    }

    /// Projects the key onto its mute reason, dropping the subject.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key cannot be decoded.
    pub fn reason(&self) -> Result<MuteReasonKey> {
        let decoded = self.decode()?;
        Ok(MuteReasonKey::encode(decoded.filter_kind, &decoded.value))
    }
}

impl fmt::Display for CatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a mute reason: `(kind, value)` without a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuteReasonKey(String);

impl MuteReasonKey {
    /// Encodes a `(kind, value)` pair.
    #[must_use]
    pub fn encode(filter_kind: FilterKind, value: &str) -> Self {
        Self([filter_kind.as_str(), &percent_encode(value)].join(KEY_SEPARATOR))
    }

    /// Wraps a raw key string without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the `(kind, value)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the separator is missing, the kind is
    /// unknown, or the value is not valid percent-encoding.
    pub fn decode(&self) -> Result<(FilterKind, String)> {
        let key = self.as_str();
        let (kind, value) = key
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| invalid_key(key, "missing separator"))?;
        Ok((parse_kind(key, kind)?, percent_decode(value)?))
    }
}

impl fmt::Display for MuteReasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
