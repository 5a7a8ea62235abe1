use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::application::commands::command_handler::Command;

/// Create habit command
#[derive(Debug, Clone, Default)]
pub struct CreateHabitCommand {
    pub user_id: String,
    pub name: String,
    /// Free-form label such as "build" or "quit"; defaults to "build"
    pub kind: Option<String>,
    pub frequency: Option<String>,
    /// Raw schedule payload, normalized on create
    pub schedule: Option<Value>,
    pub start_date: Option<DateTime<Utc>>,
    pub time_of_day: Option<String>,
    pub goal: Option<Value>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl Command for CreateHabitCommand {}

#[derive(Debug, Clone)]
pub struct CreateHabitResult {
    pub habit_id: String,
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateHabitCommand {
    pub user_id: String,
    pub habit_id: String,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub frequency: Option<String>,
    /// `Some(Value::Null)` resets the schedule to `all_time`
    pub schedule: Option<Value>,
    pub start_date: Option<DateTime<Utc>>,
    pub time_of_day: Option<String>,
    pub goal: Option<Value>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl Command for UpdateHabitCommand {}

#[derive(Debug, Clone)]
pub struct UpdateHabitResult {
    pub schedule_updated: bool,
    pub frequency_updated: bool,
}

/// Delete habit command; removes its check-ins and streak snapshots too
#[derive(Debug, Clone)]
pub struct DeleteHabitCommand {
    pub user_id: String,
    pub habit_id: String,
}

impl Command for DeleteHabitCommand {}

#[derive(Debug, Clone)]
pub struct DeleteHabitResult {
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct ArchiveHabitCommand {
    pub user_id: String,
    pub habit_id: String,
}

impl Command for ArchiveHabitCommand {}

#[derive(Debug, Clone)]
pub struct ReorderHabitCommand {
    pub user_id: String,
    pub habit_id: String,
    pub order: i64,
}

impl Command for ReorderHabitCommand {}

/// Shared result of the single-field habit commands
#[derive(Debug, Clone)]
pub struct HabitStateResult {
    pub success: bool,
}
