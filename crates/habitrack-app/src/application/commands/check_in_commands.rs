use chrono::NaiveDate;

use crate::application::commands::command_handler::Command;
use habitrack_domain::streak::StreakSnapshot;

/// Record (or overwrite) the check-in of a habit on a date
#[derive(Debug, Clone)]
pub struct RecordCheckInCommand {
    pub user_id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub skipped: bool,
    pub value: Option<f64>,
}

impl RecordCheckInCommand {
    /// A completed, non-skipped check-in without a value
    pub fn completed(user_id: &str, habit_id: &str, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.to_string(),
            habit_id: habit_id.to_string(),
            date,
            completed: true,
            skipped: false,
            value: None,
        }
    }
}

impl Command for RecordCheckInCommand {}

#[derive(Debug, Clone)]
pub struct RecordCheckInResult {
    pub check_in_id: String,
    /// False when an existing check-in for the date was overwritten
    pub created: bool,
    pub streak: StreakSnapshot,
}

#[derive(Debug, Clone)]
pub struct DeleteCheckInCommand {
    pub user_id: String,
    pub check_in_id: String,
}

impl Command for DeleteCheckInCommand {}

#[derive(Debug, Clone)]
pub struct DeleteCheckInResult {
    pub habit_id: String,
    pub streak: StreakSnapshot,
}
