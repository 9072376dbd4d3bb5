//! Deserialization of platform timestamps.
//!
//! The platform reports `created` and `updated` as
//! `2020-05-13T09:06:55.000+0000`. These attributes are read-only; they are
//! never sent back.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Timestamp format used by the platform.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parses a platform timestamp, also accepting RFC 3339.
///
/// # Errors
///
/// Returns the chrono parse error if neither format matches.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
}

/// Deserializes an optional timestamp. `null` and `""` become `None`.
pub(crate) fn deserialize<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{value}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parses_platform_format() {
        let ts = parse_timestamp("2020-05-13T09:06:55.000+0000").unwrap();
        assert_eq!(ts.year(), 2020);
        assert_eq!(ts.hour(), 9);
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parses_rfc3339() {
        let ts = parse_timestamp("2021-01-02T03:04:05+02:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
