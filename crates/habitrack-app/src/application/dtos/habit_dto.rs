use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use habitrack_domain::habit::Habit;
use habitrack_domain::shared::dates::format_date;
use habitrack_domain::streak::StreakSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub frequency: String,
    /// Normalized schedule in its wire form
    pub schedule: Value,
    pub time_of_day: Option<String>,
    pub start_date: DateTime<Utc>,
    pub goal: Option<Value>,
    pub color: String,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub order: i64,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completion_date: Option<String>, // YYYY-MM-DD
}

impl HabitDto {
    pub fn from_habit(habit: &Habit, streak: StreakSnapshot) -> Self {
        Self {
            id: habit.id().as_str().to_string(),
            user_id: habit.user_id().as_str().to_string(),
            name: habit.name().to_string(),
            kind: habit.kind().to_string(),
            frequency: habit.frequency().as_str().to_string(),
            schedule: habit.schedule().to_value(),
            time_of_day: habit.time_of_day().map(str::to_string),
            start_date: habit.start_date(),
            goal: habit.goal().cloned(),
            color: habit.color().to_string(),
            icon: habit.icon().map(str::to_string),
            category: habit.category().map(str::to_string),
            order: habit.order(),
            archived: habit.is_archived(),
            created_at: habit.created_at(),
            current_streak: streak.current_streak,
            best_streak: streak.best_streak,
            last_completion_date: streak.last_completion_date.map(format_date),
        }
    }
}
