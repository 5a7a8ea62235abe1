use chrono::{Duration, Local, NaiveDate};
use log::debug;
use serde_json::Value;

use super::value_objects::{Schedule, ScheduleMode};
use crate::shared::dates::parse_date_value;

const DAYS_21_SPAN: i64 = 20;

/// Anything `is_due` can re-normalize: a raw payload or a stored schedule.
pub trait RawSchedule {
    fn to_raw(&self) -> Option<Value>;
}

impl RawSchedule for Value {
    fn to_raw(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl RawSchedule for Option<Value> {
    fn to_raw(&self) -> Option<Value> {
        self.clone()
    }
}

impl RawSchedule for Schedule {
    fn to_raw(&self) -> Option<Value> {
        Some(self.to_value())
    }
}

/// Canonicalize a free-form schedule payload.
///
/// Never fails: a missing payload, a non-object, or an unknown `mode`
/// yields [`Schedule::AllTime`], and malformed fields read as absent.
/// Every non-`all_time` mode anchors `start` at `today`, whatever the
/// payload says.
pub fn normalize(raw: Option<&Value>, today: NaiveDate) -> Schedule {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return Schedule::AllTime;
    };

    let mode = obj
        .get("mode")
        .and_then(Value::as_str)
        .and_then(ScheduleMode::parse)
        .unwrap_or(ScheduleMode::AllTime);

    let start = today;
    match mode {
        ScheduleMode::AllTime => Schedule::AllTime,
        ScheduleMode::Days21 => Schedule::Days21 {
            start,
            end: start
                .checked_add_signed(Duration::days(DAYS_21_SPAN))
                .unwrap_or(NaiveDate::MAX),
        },
        ScheduleMode::DateRange => {
            let end = ["end", "to", "until"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(parse_date_value))
                .unwrap_or(start)
                .max(start);
            Schedule::DateRange { start, end }
        }
        ScheduleMode::Weekdays => {
            let mut days: Vec<u8> = array_field(obj.get("days"))
                .iter()
                .filter_map(coerce_int)
                .filter(|d| (1..=7).contains(d))
                .map(|d| d as u8)
                .collect();
            days.sort_unstable();
            days.dedup();
            Schedule::Weekdays { start, days }
        }
        ScheduleMode::SpecificDates => {
            // `days` is accepted when `dates` is missing or empty
            let candidates = match array_field(obj.get("dates")) {
                dates if !dates.is_empty() => dates,
                _ => array_field(obj.get("days")),
            };
            let mut dates: Vec<NaiveDate> = candidates
                .iter()
                .filter_map(parse_date_value)
                .filter(|d| *d >= start)
                .collect();
            dates.sort_unstable();
            dates.dedup();
            Schedule::SpecificDates { start, dates }
        }
    }
}

/// Whether a habit with this schedule is due on `day`.
///
/// The input is re-normalized against the current local date first, so
/// stale or hand-built values are tolerated.
pub fn is_due<S: RawSchedule + ?Sized>(schedule: &S, day: NaiveDate) -> bool {
    is_due_as_of(schedule, day, Local::now().date_naive())
}

/// [`is_due`] with an explicit re-normalization date.
pub fn is_due_as_of<S: RawSchedule + ?Sized>(
    schedule: &S,
    day: NaiveDate,
    today: NaiveDate,
) -> bool {
    let normalized = normalize(schedule.to_raw().as_ref(), today);
    let due = normalized.occurs_on(day);
    debug!(
        "[schedule] is_due mode={} day={} today={} due={}",
        normalized.mode(),
        day,
        today,
        due
    );
    due
}

fn array_field(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
