use serde::{Deserialize, Serialize};

use habitrack_domain::shared::dates::format_date;
use habitrack_domain::streak::StreakSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub habit_id: String,
    pub frequency: String,
    pub as_of: String,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completion_date: Option<String>, // YYYY-MM-DD
}

impl StreakDto {
    pub fn new(habit_id: &str, frequency: &str, as_of: &str, snapshot: StreakSnapshot) -> Self {
        Self {
            habit_id: habit_id.to_string(),
            frequency: frequency.to_string(),
            as_of: as_of.to_string(),
            current_streak: snapshot.current_streak,
            best_streak: snapshot.best_streak,
            last_completion_date: snapshot.last_completion_date.map(format_date),
        }
    }
}
