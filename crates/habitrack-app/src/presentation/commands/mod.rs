// Module declarations
pub mod analytics;
pub mod check_in;
pub mod config;
pub mod habit;
pub mod schedule;

// Re-export all commands for easy access
pub use analytics::*;
pub use check_in::*;
pub use config::*;
pub use habit::*;
pub use schedule::*;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::presentation::error::CommandError;
use habitrack_domain::shared::dates::parse_date_str;

/// `YYYY-MM-DD` (or datetime) argument; anything unparseable is a validation error.
pub(crate) fn parse_date_arg(field: &str, value: &str) -> Result<NaiveDate, CommandError> {
    parse_date_str(value)
        .ok_or_else(|| CommandError::validation(format!("Invalid {field}: {value}")))
}

pub(crate) fn parse_optional_date_arg(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, CommandError> {
    value.map(|v| parse_date_arg(field, v)).transpose()
}

/// RFC 3339 timestamp, or a bare date taken as midnight UTC
pub(crate) fn parse_timestamp_arg(
    field: &str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, CommandError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    let date = parse_date_arg(field, value)?;
    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}
