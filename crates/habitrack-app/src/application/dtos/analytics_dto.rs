use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CheckInDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitAnalyticsDto {
    pub habit_id: String,
    pub completion_rate: f64, // percentage, 2 decimals
    pub completed_count: u32,
    pub skipped_count: u32,
    pub total_days: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub check_ins: Vec<CheckInDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDto {
    pub start_date: String,
    pub end_date: String,
    /// Completed check-ins per YYYY-MM-DD
    pub data: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekDayDto {
    pub date: String,
    pub weekday: u8, // 1 = Monday
    pub scheduled: u32,
    pub completed: u32,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekOverviewDto {
    pub week_start: String,
    pub days: Vec<WeekDayDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    RecentActivity,
    BestWeekday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightDto {
    pub habit_id: String,
    pub habit_name: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsDto {
    pub insights: Vec<InsightDto>,
}
