use serde::Deserialize;

use super::{parse_date_arg, parse_optional_date_arg};
use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::dtos::{CheckInDto, CheckInResultDto};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use habitrack_domain::shared::{CheckInId, UserId};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordCheckInInput {
    pub habit_id: String,
    pub date: String,
    #[serde(default = "default_true")]
    pub completed: bool,
    #[serde(default)]
    pub skipped: bool,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCheckInInput {
    pub check_in_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCheckInsInput {
    pub habit_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Record (or overwrite) a check-in and return the refreshed streak
pub async fn record_check_in(
    user_id: &str,
    input: RecordCheckInInput,
    state: &AppState,
) -> Result<CheckInResultDto, CommandError> {
    let command = RecordCheckInCommand {
        user_id: user_id.to_string(),
        habit_id: input.habit_id,
        date: parse_date_arg("date", &input.date)?,
        completed: input.completed,
        skipped: input.skipped,
        value: input.value,
    };

    let result = state.command_handlers.record_check_in.handle(command).await?;

    let check_in = state
        .repositories
        .check_in
        .find_by_id(
            &UserId::from_string(user_id),
            &CheckInId::from_string(&result.check_in_id),
        )
        .await?;

    Ok(CheckInResultDto::new(
        check_in.as_ref().map(CheckInDto::from),
        result.created,
        result.streak,
    ))
}

/// Delete a check-in and return the habit's recomputed streak
pub async fn delete_check_in(
    user_id: &str,
    input: DeleteCheckInInput,
    state: &AppState,
) -> Result<CheckInResultDto, CommandError> {
    let command = DeleteCheckInCommand {
        user_id: user_id.to_string(),
        check_in_id: input.check_in_id,
    };

    let result = state.command_handlers.delete_check_in.handle(command).await?;
    Ok(CheckInResultDto::new(None, false, result.streak))
}

pub async fn list_check_ins(
    user_id: &str,
    input: ListCheckInsInput,
    state: &AppState,
) -> Result<Vec<CheckInDto>, CommandError> {
    let start = parse_optional_date_arg("start_date", input.start_date.as_deref())?;
    let end = parse_optional_date_arg("end_date", input.end_date.as_deref())?;

    Ok(state
        .queries
        .check_in
        .list_check_ins(user_id, input.habit_id.as_deref(), start, end)
        .await?)
}

pub async fn today_check_ins(
    user_id: &str,
    state: &AppState,
) -> Result<Vec<CheckInDto>, CommandError> {
    Ok(state.queries.check_in.today_check_ins(user_id).await?)
}
