//! Lenient timestamp parsing for task API payloads.
//!
//! The API emits RFC 3339 (`"2026-02-09T14:30:00+00:00"`) for some rows and
//! naive ISO-8601 without an offset (`"2026-02-09T14:30:00.123456"`) for
//! others. Naive values are interpreted as UTC. Serialization always uses
//! RFC 3339 via chrono's serde support.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::errors::CoreError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in any accepted format.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] if `value` matches no format.
pub fn parse(value: &str) -> Result<DateTime<Utc>, CoreError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(CoreError::InvalidTimestamp {
        value: value.to_string(),
        reason: "expected RFC 3339 or ISO-8601 date-time".into(),
    })
}

/// Serde adapter for required timestamp fields.
///
/// # Errors
///
/// Fails if the field is not a string or cannot be parsed.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for nullable timestamp fields. `null` and `""` both map to
/// `None`. Pair with `#[serde(default)]` so a missing field is also `None`.
///
/// # Errors
///
/// Fails if a non-empty string cannot be parsed.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse(raw).map(Some).map_err(serde::de::Error::custom),
    }
}
