use std::str::FromStr;

use tsk_core::errors::CoreError;

/// Parse a status or priority from loose user input (`in-progress`, `todo`, `HIGH`).
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    raw.parse::<T>()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional flag value.
pub fn parse_optional<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = CoreError>,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}
