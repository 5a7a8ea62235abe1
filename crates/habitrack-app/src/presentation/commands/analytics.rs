use serde::Deserialize;

use super::parse_optional_date_arg;
use crate::application::dtos::{HabitAnalyticsDto, HeatmapDto, InsightsDto, WeekOverviewDto};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct HabitAnalyticsInput {
    pub habit_id: String,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeatmapInput {
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekOverviewInput {
    pub date: Option<String>,
}

pub async fn get_habit_analytics(
    user_id: &str,
    input: HabitAnalyticsInput,
    state: &AppState,
) -> Result<HabitAnalyticsDto, CommandError> {
    Ok(state
        .queries
        .analytics
        .habit_analytics(user_id, &input.habit_id, input.days)
        .await?)
}

pub async fn get_heatmap(
    user_id: &str,
    input: HeatmapInput,
    state: &AppState,
) -> Result<HeatmapDto, CommandError> {
    Ok(state.queries.analytics.heatmap(user_id, input.days).await?)
}

pub async fn get_week_overview(
    user_id: &str,
    input: WeekOverviewInput,
    state: &AppState,
) -> Result<WeekOverviewDto, CommandError> {
    let date = parse_optional_date_arg("date", input.date.as_deref())?;
    Ok(state.queries.analytics.week_overview(user_id, date).await?)
}

pub async fn get_insights(user_id: &str, state: &AppState) -> Result<InsightsDto, CommandError> {
    Ok(state.queries.analytics.insights(user_id).await?)
}
