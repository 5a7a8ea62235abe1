use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use habitrack_domain::check_in::CheckIn;
use habitrack_domain::shared::dates::format_date;
use habitrack_domain::streak::StreakSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInDto {
    pub id: String,
    pub user_id: String,
    pub habit_id: String,
    pub date: String, // YYYY-MM-DD
    pub completed: bool,
    pub value: Option<f64>,
    pub skipped: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&CheckIn> for CheckInDto {
    fn from(check_in: &CheckIn) -> Self {
        Self {
            id: check_in.id().as_str().to_string(),
            user_id: check_in.user_id().as_str().to_string(),
            habit_id: check_in.habit_id().as_str().to_string(),
            date: format_date(check_in.date()),
            completed: check_in.is_completed(),
            value: check_in.value(),
            skipped: check_in.is_skipped(),
            created_at: check_in.created_at(),
        }
    }
}

/// Response of a check-in write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResultDto {
    pub check_in: Option<CheckInDto>,
    pub created: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completion_date: Option<String>,
}

impl CheckInResultDto {
    pub fn new(check_in: Option<CheckInDto>, created: bool, streak: StreakSnapshot) -> Self {
        Self {
            check_in,
            created,
            current_streak: streak.current_streak,
            best_streak: streak.best_streak,
            last_completion_date: streak.last_completion_date.map(format_date),
        }
    }
}
