use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{parse_optional_date_arg, parse_timestamp_arg};
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use crate::application::dtos::{HabitDto, StreakDto};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHabitInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub frequency: Option<String>,
    pub schedule: Option<Value>,
    pub start_date: Option<String>,
    pub time_of_day: Option<String>,
    pub goal: Option<Value>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHabitInput {
    pub habit_id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub frequency: Option<String>,
    /// `null` resets to `all_time`
    #[serde(default, deserialize_with = "present_value")]
    pub schedule: Option<Value>,
    pub start_date: Option<String>,
    pub time_of_day: Option<String>,
    pub goal: Option<Value>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HabitIdInput {
    pub habit_id: String,
    /// Date the streak is evaluated at; defaults to today
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListHabitsInput {
    #[serde(default)]
    pub archived: bool,
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderHabitInput {
    pub habit_id: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessDto {
    pub success: bool,
}

/// Create a habit and return it with its (empty) streak
pub async fn create_habit(
    user_id: &str,
    input: CreateHabitInput,
    state: &AppState,
) -> Result<HabitDto, CommandError> {
    let command = CreateHabitCommand {
        user_id: user_id.to_string(),
        name: input.name,
        kind: input.kind,
        frequency: input.frequency,
        schedule: input.schedule,
        start_date: parse_timestamp_arg("start_date", input.start_date.as_deref())?,
        time_of_day: input.time_of_day,
        goal: input.goal,
        color: input.color,
        icon: input.icon,
        category: input.category,
    };

    let result = state.command_handlers.create_habit.handle(command).await?;

    Ok(state
        .queries
        .habit
        .get_habit(user_id, &result.habit_id, None)
        .await?)
}

/// Partially update a habit; a `null` schedule resets it to `all_time`
pub async fn update_habit(
    user_id: &str,
    input: UpdateHabitInput,
    state: &AppState,
) -> Result<HabitDto, CommandError> {
    let habit_id = input.habit_id;
    let command = UpdateHabitCommand {
        user_id: user_id.to_string(),
        habit_id: habit_id.clone(),
        name: input.name,
        kind: input.kind,
        frequency: input.frequency,
        schedule: input.schedule,
        start_date: parse_timestamp_arg("start_date", input.start_date.as_deref())?,
        time_of_day: input.time_of_day,
        goal: input.goal,
        color: input.color,
        icon: input.icon,
        category: input.category,
    };

    state.command_handlers.update_habit.handle(command).await?;

    Ok(state.queries.habit.get_habit(user_id, &habit_id, None).await?)
}

/// Delete a habit with its check-ins and streak snapshot
pub async fn delete_habit(
    user_id: &str,
    input: HabitIdInput,
    state: &AppState,
) -> Result<SuccessDto, CommandError> {
    let command = DeleteHabitCommand {
        user_id: user_id.to_string(),
        habit_id: input.habit_id,
    };

    let result = state.command_handlers.delete_habit.handle(command).await?;
    Ok(SuccessDto {
        success: result.success,
    })
}

pub async fn archive_habit(
    user_id: &str,
    input: HabitIdInput,
    state: &AppState,
) -> Result<SuccessDto, CommandError> {
    let command = ArchiveHabitCommand {
        user_id: user_id.to_string(),
        habit_id: input.habit_id,
    };

    let result = state.command_handlers.archive_habit.handle(command).await?;
    Ok(SuccessDto {
        success: result.success,
    })
}

pub async fn reorder_habit(
    user_id: &str,
    input: ReorderHabitInput,
    state: &AppState,
) -> Result<SuccessDto, CommandError> {
    let command = ReorderHabitCommand {
        user_id: user_id.to_string(),
        habit_id: input.habit_id,
        order: input.order,
    };

    let result = state.command_handlers.reorder_habit.handle(command).await?;
    Ok(SuccessDto {
        success: result.success,
    })
}

pub async fn list_habits(
    user_id: &str,
    input: ListHabitsInput,
    state: &AppState,
) -> Result<Vec<HabitDto>, CommandError> {
    let as_of = parse_optional_date_arg("as_of", input.as_of.as_deref())?;
    Ok(state
        .queries
        .habit
        .list_habits(user_id, input.archived, as_of)
        .await?)
}

pub async fn get_habit(
    user_id: &str,
    input: HabitIdInput,
    state: &AppState,
) -> Result<HabitDto, CommandError> {
    let as_of = parse_optional_date_arg("as_of", input.as_of.as_deref())?;
    Ok(state
        .queries
        .habit
        .get_habit(user_id, &input.habit_id, as_of)
        .await?)
}

pub async fn get_streak(
    user_id: &str,
    input: HabitIdInput,
    state: &AppState,
) -> Result<StreakDto, CommandError> {
    let as_of = parse_optional_date_arg("as_of", input.as_of.as_deref())?;
    Ok(state
        .queries
        .habit
        .get_streak(user_id, &input.habit_id, as_of)
        .await?)
}
