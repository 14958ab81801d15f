//! Minute-precision text formats for session timestamps and times of day.

use chrono::{NaiveDateTime, NaiveTime, ParseResult};

/// Session timestamp format, e.g. `2025-01-31 09:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Time-of-day format, e.g. `21:00`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a `YYYY-MM-DD HH:MM` timestamp.
///
/// # Errors
///
/// Returns a chrono `ParseError` when `s` does not match [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(s: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
}

/// Parses an `HH:MM` time of day.
///
/// # Errors
///
/// Returns a chrono `ParseError` when `s` does not match [`TIME_FORMAT`].
pub fn parse_time(s: &str) -> ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
}

/// Serde adapter for [`TIMESTAMP_FORMAT`] fields.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(super::TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(|e| {
            de::Error::custom(format!("invalid timestamp \"{raw}\" (expected YYYY-MM-DD HH:MM): {e}"))
        })
    }
}

/// Serde adapter for [`TIME_FORMAT`] fields.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(|e| {
            de::Error::custom(format!("invalid time \"{raw}\" (expected HH:MM): {e}"))
        })
    }
}
