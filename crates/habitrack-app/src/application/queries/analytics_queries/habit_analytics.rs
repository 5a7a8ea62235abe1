use crate::application::dtos::{CheckInDto, HabitAnalyticsDto};
use habitrack_domain::check_in::CheckIn;
use habitrack_domain::streak::StreakSnapshot;

/// The window spans `days + 1` calendar days; the rate is over that span, 2 decimals.
pub(super) fn summarize(
    habit_id: &str,
    days: u32,
    check_ins: &[CheckIn],
    streak: StreakSnapshot,
) -> HabitAnalyticsDto {
    let total_days = days.saturating_add(1);
    let completed_count = check_ins.iter().filter(|c| c.is_completed()).count() as u32;
    let skipped_count = check_ins.iter().filter(|c| c.is_skipped()).count() as u32;

    HabitAnalyticsDto {
        habit_id: habit_id.to_string(),
        completion_rate: round2(f64::from(completed_count) / f64::from(total_days) * 100.0),
        completed_count,
        skipped_count,
        total_days,
        current_streak: streak.current_streak,
        best_streak: streak.best_streak,
        check_ins: check_ins.iter().map(CheckInDto::from).collect(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
