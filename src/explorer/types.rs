//! Error definitions and provider field parsing.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the explorer.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not valid JSON.
    #[error("Invalid JSON from provider: {0}")]
    Parse(#[from] serde_json::Error),

    /// An expected key is absent from the response, or has the wrong type.
    #[error("Missing field '{0}' in provider response")]
    MissingField(String),

    /// A numeric field could not be parsed.
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Epoch seconds outside the representable range.
    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    /// The provider answered with an error envelope.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The client could not be built from its configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Addresses and hashes are compared case-insensitively by storing them lower-cased.
pub fn normalize_hex_id(raw: &str) -> String {
    raw.to_lowercase()
}

/// A recipient is absent for contract creations. The provider reports that
/// as `null` or an empty string.
pub fn normalize_recipient(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.is_empty()).map(normalize_hex_id)
}

fn split_radix(raw: &str) -> (&str, u32) {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    }
}

/// Parse an amount, auto-detecting `0x` hex or decimal.
pub fn parse_quantity(field: &'static str, raw: &str) -> ExplorerResult<U256> {
    let invalid = || ExplorerError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    let (digits, radix) = split_radix(raw);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    U256::from_str_radix(digits, radix as u64).map_err(|_| invalid())
}

/// Parse a block number, auto-detecting `0x` hex or decimal.
pub fn parse_block(raw: &str) -> ExplorerResult<u64> {
    let (digits, radix) = split_radix(raw);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ExplorerError::InvalidNumber {
            field: "block",
            value: raw.to_string(),
        });
    }
    u64::from_str_radix(digits, radix).map_err(|_| ExplorerError::InvalidNumber {
        field: "block",
        value: raw.to_string(),
    })
}

/// Parse a decimal Unix-epoch seconds string into a UTC timestamp.
pub fn parse_timestamp(raw: &str) -> ExplorerResult<DateTime<Utc>> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ExplorerError::InvalidNumber {
            field: "timestamp",
            value: raw.to_string(),
        })?;
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or(ExplorerError::InvalidTimestamp(secs))
}

/// Look up `key` in a JSON object. `context` names the enclosing object in
/// the error, e.g. `result` gives `result.from`.
pub(crate) fn lookup<'a>(value: &'a Value, key: &str, context: &str) -> ExplorerResult<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| ExplorerError::MissingField(format!("{}.{}", context, key)))
}

pub(crate) fn lookup_str<'a>(value: &'a Value, key: &str, context: &str) -> ExplorerResult<&'a str> {
    lookup(value, key, context)?
        .as_str()
        .ok_or_else(|| ExplorerError::MissingField(format!("{}.{}", context, key)))
}

/// Like [`lookup_str`], but a present `null` reads as `None`.
pub(crate) fn lookup_nullable_str<'a>(
    value: &'a Value,
    key: &str,
    context: &str,
) -> ExplorerResult<Option<&'a str>> {
    match lookup(value, key, context)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ExplorerError::MissingField(format!("{}.{}", context, key))),
    }
}
