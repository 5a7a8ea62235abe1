//! Calendar date helpers shared by the schedule and streak modules.
//!
//! All dates are naive calendar dates in a single timezone. At the boundary
//! they travel as ISO-8601 `YYYY-MM-DD` strings.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse `YYYY-MM-DD`, or take the date part of a datetime string.
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Lenient parse of a JSON value; anything that is not a date string is `None`.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date_str)
}

/// ISO weekday number, Monday = 1 .. Sunday = 7.
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Monday of the ISO week containing `date`, clamped to `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date_str("2024-01-05"), Some(d("2024-01-05")));
        assert_eq!(parse_date_str(" 2024-01-05 "), Some(d("2024-01-05")));
    }

    #[test]
    fn test_parse_datetime_takes_date_part() {
        assert_eq!(parse_date_str("2024-01-05T23:10:00"), Some(d("2024-01-05")));
        assert_eq!(
            parse_date_str("2024-01-05T08:00:00+02:00"),
            Some(d("2024-01-05"))
        );
        assert_eq!(parse_date_str("2024-01-05 07:30:00"), Some(d("2024-01-05")));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_date_str("tomorrow"), None);
        assert_eq!(parse_date_str("2024-13-01"), None);
        assert_eq!(parse_date_value(&json!(20240105)), None);
        assert_eq!(parse_date_value(&Value::Null), None);
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-01 is a Monday
        assert_eq!(week_start(d("2024-01-01")), d("2024-01-01"));
        assert_eq!(week_start(d("2024-01-07")), d("2024-01-01"));
        assert_eq!(week_start(d("2024-01-08")), d("2024-01-08"));
    }

    #[test]
    fn test_week_start_clamps_at_calendar_minimum() {
        let start = week_start(NaiveDate::MIN);
        assert!(start <= NaiveDate::MIN + chrono::Duration::days(6));
        assert!(start >= NaiveDate::MIN);
    }

    #[test]
    fn test_iso_weekday() {
        assert_eq!(iso_weekday(d("2024-01-01")), 1);
        assert_eq!(iso_weekday(d("2024-01-07")), 7);
    }

    #[test]
    fn test_format_round_trip() {
        assert_eq!(format_date(d("2024-02-29")), "2024-02-29");
    }
}
