//! Local wall-clock <-> absolute instant conversion
//!
//! Form inputs carry `datetime-local` strings (`YYYY-MM-DDTHH:MM`) that are
//! interpreted in the business timezone; the wire carries ISO 8601 instants.

use chrono::{DateTime, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LOCAL_INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Time conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid local date/time: {0}")]
    InvalidFormat(String),

    #[error("local time {0} does not exist in this timezone")]
    Nonexistent(String),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}

/// Parse a `datetime-local` value (seconds optional).
pub fn parse_local_input(value: &str) -> Result<NaiveDateTime, TimeError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT_SECONDS))
        .map_err(|_| TimeError::InvalidFormat(value.to_string()))
}

/// Interpret a local wall-clock value in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::Nonexistent(
            local.format(LOCAL_INPUT_FORMAT).to_string(),
        )),
    }
}

/// `datetime-local` string to absolute instant.
pub fn local_input_to_utc(value: &str, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    local_to_utc(parse_local_input(value)?, tz)
}

/// ISO 8601 with millisecond precision and a `Z` suffix.
pub fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO 8601 instant from the wire.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an instant as a `datetime-local` value in `tz`.
pub fn to_local_input(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}

/// Wire ISO string to `datetime-local`; empty when unparsable.
pub fn iso_to_local_input(value: &str, tz: Tz) -> String {
    parse_instant(value)
        .map(|instant| to_local_input(instant, tz))
        .unwrap_or_default()
}
