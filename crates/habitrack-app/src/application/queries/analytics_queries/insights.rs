use chrono::Datelike;

use crate::application::dtos::{InsightDto, InsightKind};
use habitrack_domain::check_in::CheckIn;
use habitrack_domain::habit::Habit;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Minimum number of check-ins before a best weekday is reported
const MIN_WEEKDAY_SAMPLE: usize = 3;

/// Insights for one habit from its most recent check-ins.
pub(super) fn for_habit(habit: &Habit, recent: &[CheckIn]) -> Vec<InsightDto> {
    let mut insights = Vec::new();
    let insight = |kind, message| InsightDto {
        habit_id: habit.id().as_str().to_string(),
        habit_name: habit.name().to_string(),
        kind,
        message,
    };

    let completed = recent
        .iter()
        .filter(|c| c.status().counts_toward_streak())
        .count();
    if completed > 0 {
        insights.push(insight(
            InsightKind::RecentActivity,
            format!(
                "In the last {} check-ins, you completed '{}' {} time(s).",
                recent.len(),
                habit.name(),
                completed
            ),
        ));
    }

    if recent.len() >= MIN_WEEKDAY_SAMPLE {
        if let Some(best) = best_weekday(recent) {
            insights.push(insight(
                InsightKind::BestWeekday,
                format!(
                    "You complete '{}' most often on {}",
                    habit.name(),
                    WEEKDAY_NAMES[best]
                ),
            ));
        }
    }

    insights
}

/// Weekday index (Monday = 0) with the highest completed/total ratio; ties go
/// to the earlier weekday.
fn best_weekday(check_ins: &[CheckIn]) -> Option<usize> {
    let mut total = [0u32; 7];
    let mut completed = [0u32; 7];
    for check_in in check_ins {
        let idx = check_in.date().weekday().num_days_from_monday() as usize;
        total[idx] += 1;
        if check_in.is_completed() {
            completed[idx] += 1;
        }
    }

    let ratio = |idx: usize| {
        if total[idx] == 0 {
            0.0
        } else {
            f64::from(completed[idx]) / f64::from(total[idx])
        }
    };

    let mut best = 0;
    for idx in 1..7 {
        if ratio(idx) > ratio(best) {
            best = idx;
        }
    }

    (total[best] > 0).then_some(best)
}
