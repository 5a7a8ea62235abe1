#![allow(dead_code)]

use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

use habitrack_app::application::dtos::{CheckInResultDto, HabitDto};
use habitrack_app::presentation::bootstrap::build_in_memory_app_state;
use habitrack_app::presentation::commands::{
    create_habit, record_check_in, CreateHabitInput, RecordCheckInInput,
};
use habitrack_app::presentation::error::CommandError;
use habitrack_app::presentation::state::AppState;
use habitrack_domain::shared::{FixedClock, HabitId, UserId};
use habitrack_domain::streak::StreakSnapshot;

/// Wednesday
pub const TODAY: &str = "2024-01-10";

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// Fully wired state over a private in-memory database, frozen at `today`.
/// The temp dir holds the config file and must outlive the state.
pub async fn setup_state(today: &str) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = build_in_memory_app_state(
        dir.path().join("habitrack.json"),
        Arc::new(FixedClock(d(today))),
    )
    .await
    .expect("build app state");
    (state, dir)
}

pub async fn new_habit(
    state: &AppState,
    user_id: &str,
    name: &str,
    schedule: Option<Value>,
) -> HabitDto {
    let input = CreateHabitInput {
        name: name.to_string(),
        schedule,
        ..Default::default()
    };
    create_habit(user_id, input, state)
        .await
        .expect("create habit")
}

pub async fn complete(
    state: &AppState,
    user_id: &str,
    habit_id: &str,
    date: &str,
) -> Result<CheckInResultDto, CommandError> {
    record(state, user_id, habit_id, date, true, false).await
}

pub async fn record(
    state: &AppState,
    user_id: &str,
    habit_id: &str,
    date: &str,
    completed: bool,
    skipped: bool,
) -> Result<CheckInResultDto, CommandError> {
    let input = RecordCheckInInput {
        habit_id: habit_id.to_string(),
        date: date.to_string(),
        completed,
        skipped,
        value: None,
    };
    record_check_in(user_id, input, state).await
}

/// Snapshot as last written to the streak table; empty when never refreshed
pub async fn stored_streak(state: &AppState, user_id: &str, habit_id: &str) -> StreakSnapshot {
    state
        .repositories
        .streak
        .find(&UserId::from_string(user_id), &HabitId::from_string(habit_id))
        .await
        .expect("find streak")
        .map(|record| *record.snapshot())
        .unwrap_or_default()
}
