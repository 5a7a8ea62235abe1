use serde::Deserialize;

use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use habitrack_infrastructure::config::LogLevel;

#[derive(Debug, Clone, Deserialize)]
pub struct SetLogLevelInput {
    pub level: String,
}

/// Get current log level
pub async fn get_log_level(state: &AppState) -> Result<String, CommandError> {
    let level = state.services.config.get_log_level();
    Ok(level.as_str().to_string())
}

/// Set log level
pub async fn set_log_level(input: SetLogLevelInput, state: &AppState) -> Result<(), CommandError> {
    let log_level: LogLevel = input.level.parse().map_err(|_| {
        CommandError::validation(
            "Invalid log level. Must be one of: error, warn, info, debug, trace",
        )
    })?;

    state
        .services
        .config
        .set_log_level(log_level)
        .map_err(|e| CommandError::infrastructure(format!("Failed to save log level: {}", e)))?;
    Ok(())
}
