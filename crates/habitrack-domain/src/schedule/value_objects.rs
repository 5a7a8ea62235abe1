use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::dates::iso_weekday;

/// Canonical recurrence rule of a habit.
///
/// Only [`normalize`](super::normalize) should build the non-`AllTime`
/// variants: it is the place where `start` is anchored, ranges are clamped,
/// and day/date lists are deduplicated and sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Schedule {
    #[default]
    AllTime,
    #[serde(rename = "days_21")]
    Days21 { start: NaiveDate, end: NaiveDate },
    DateRange { start: NaiveDate, end: NaiveDate },
    Weekdays { start: NaiveDate, days: Vec<u8> },
    SpecificDates { start: NaiveDate, dates: Vec<NaiveDate> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    AllTime,
    Days21,
    DateRange,
    Weekdays,
    SpecificDates,
}

impl ScheduleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleMode::AllTime => "all_time",
            ScheduleMode::Days21 => "days_21",
            ScheduleMode::DateRange => "date_range",
            ScheduleMode::Weekdays => "weekdays",
            ScheduleMode::SpecificDates => "specific_dates",
        }
    }

    /// Unknown tags are `None`; the normalizer maps them to `AllTime`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all_time" => Some(ScheduleMode::AllTime),
            "days_21" => Some(ScheduleMode::Days21),
            "date_range" => Some(ScheduleMode::DateRange),
            "weekdays" => Some(ScheduleMode::Weekdays),
            "specific_dates" => Some(ScheduleMode::SpecificDates),
            _ => None,
        }
    }
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Schedule {
    pub fn mode(&self) -> ScheduleMode {
        match self {
            Schedule::AllTime => ScheduleMode::AllTime,
            Schedule::Days21 { .. } => ScheduleMode::Days21,
            Schedule::DateRange { .. } => ScheduleMode::DateRange,
            Schedule::Weekdays { .. } => ScheduleMode::Weekdays,
            Schedule::SpecificDates { .. } => ScheduleMode::SpecificDates,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            Schedule::AllTime => None,
            Schedule::Days21 { start, .. }
            | Schedule::DateRange { start, .. }
            | Schedule::Weekdays { start, .. }
            | Schedule::SpecificDates { start, .. } => Some(*start),
        }
    }

    /// Evaluate this value as-is, without re-normalizing.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        if let Some(start) = self.start() {
            if day < start {
                return false;
            }
        }

        match self {
            Schedule::AllTime => true,
            Schedule::Days21 { start, end } | Schedule::DateRange { start, end } => {
                *start <= day && day <= *end
            }
            Schedule::Weekdays { days, .. } => days.contains(&iso_weekday(day)),
            Schedule::SpecificDates { dates, .. } => dates.contains(&day),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Every variant serializes to a JSON object.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
