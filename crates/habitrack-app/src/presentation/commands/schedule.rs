use serde::Deserialize;
use serde_json::Value;

use super::{parse_date_arg, parse_optional_date_arg};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use habitrack_domain::schedule::{is_due_as_of, normalize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizeScheduleInput {
    pub schedule: Option<Value>,
    /// Anchor for `start`; defaults to today
    pub today: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IsDueInput {
    pub schedule: Option<Value>,
    pub date: String,
    pub today: Option<String>,
}

/// Canonical form of a raw schedule payload
pub async fn normalize_schedule(
    input: NormalizeScheduleInput,
    state: &AppState,
) -> Result<Value, CommandError> {
    let today = parse_optional_date_arg("today", input.today.as_deref())?
        .unwrap_or_else(|| state.runtime.clock.today());
    Ok(normalize(input.schedule.as_ref(), today).to_value())
}

pub async fn is_due(input: IsDueInput, state: &AppState) -> Result<bool, CommandError> {
    let day = parse_date_arg("date", &input.date)?;
    let today = parse_optional_date_arg("today", input.today.as_deref())?
        .unwrap_or_else(|| state.runtime.clock.today());
    Ok(is_due_as_of(&input.schedule, day, today))
}
