//! JSON-lines command channel.
//!
//! Each input line is one request:
//! `{"id": 1, "command": "record_check_in", "user_id": "u1", "args": {...}}`
//! and produces exactly one response line:
//! `{"id": 1, "ok": true, "data": ...}` or `{"id": 1, "ok": false, "error": {...}}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::presentation::commands::*;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct IpcRequest {
    /// Echoed back untouched
    #[serde(default)]
    pub id: Option<Value>,
    pub command: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcResponse {
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl IpcResponse {
    fn from_result(id: Option<Value>, result: Result<Value, CommandError>) -> Self {
        match result {
            Ok(data) => Self {
                id,
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Self {
                id,
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Every command name `dispatch` understands
pub const COMMANDS: &[&str] = &[
    // Habit commands
    "create_habit",
    "update_habit",
    "delete_habit",
    "archive_habit",
    "reorder_habit",
    "list_habits",
    "get_habit",
    "get_streak",
    // Check-in commands
    "record_check_in",
    "delete_check_in",
    "list_check_ins",
    "today_check_ins",
    // Analytics commands
    "get_habit_analytics",
    "get_heatmap",
    "get_week_overview",
    "get_insights",
    // Schedule commands
    "normalize_schedule",
    "is_due",
    // Config commands
    "get_log_level",
    "set_log_level",
];

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, CommandError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| CommandError::validation(format!("Invalid arguments: {}", e)))
}

fn to_data<T: Serialize>(result: Result<T, CommandError>) -> Result<Value, CommandError> {
    result.and_then(|value| serde_json::to_value(value).map_err(CommandError::from))
}

fn require_user(user_id: Option<&str>) -> Result<&str, CommandError> {
    user_id
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| CommandError::validation("user_id is required"))
}

/// Route one request to its command function.
pub async fn dispatch(state: &AppState, request: IpcRequest) -> IpcResponse {
    let IpcRequest {
        id,
        command,
        user_id,
        args,
    } = request;

    debug!("[ipc] command={} user_id={:?}", command, user_id);

    let result = route(state, &command, user_id.as_deref(), args).await;
    if let Err(e) = &result {
        if e.is_bad_request() {
            info!("[ipc] command={} rejected: {}", command, e);
        } else {
            warn!("[ipc] command={} failed: {}", command, e);
        }
    }

    IpcResponse::from_result(id, result)
}

async fn route(
    state: &AppState,
    command: &str,
    user_id: Option<&str>,
    args: Value,
) -> Result<Value, CommandError> {
    match command {
        "create_habit" => to_data(create_habit(require_user(user_id)?, parse_args(args)?, state).await),
        "update_habit" => to_data(update_habit(require_user(user_id)?, parse_args(args)?, state).await),
        "delete_habit" => to_data(delete_habit(require_user(user_id)?, parse_args(args)?, state).await),
        "archive_habit" => {
            to_data(archive_habit(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "reorder_habit" => {
            to_data(reorder_habit(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "list_habits" => to_data(list_habits(require_user(user_id)?, parse_args(args)?, state).await),
        "get_habit" => to_data(get_habit(require_user(user_id)?, parse_args(args)?, state).await),
        "get_streak" => to_data(get_streak(require_user(user_id)?, parse_args(args)?, state).await),
        "record_check_in" => {
            to_data(record_check_in(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "delete_check_in" => {
            to_data(delete_check_in(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "list_check_ins" => {
            to_data(list_check_ins(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "today_check_ins" => to_data(today_check_ins(require_user(user_id)?, state).await),
        "get_habit_analytics" => {
            to_data(get_habit_analytics(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "get_heatmap" => to_data(get_heatmap(require_user(user_id)?, parse_args(args)?, state).await),
        "get_week_overview" => {
            to_data(get_week_overview(require_user(user_id)?, parse_args(args)?, state).await)
        }
        "get_insights" => to_data(get_insights(require_user(user_id)?, state).await),
        "normalize_schedule" => to_data(normalize_schedule(parse_args(args)?, state).await),
        "is_due" => to_data(is_due(parse_args(args)?, state).await),
        "get_log_level" => to_data(get_log_level(state).await),
        "set_log_level" => to_data(set_log_level(parse_args(args)?, state).await),
        other => Err(CommandError::validation(format!("Unknown command: {}", other))),
    }
}

/// Handle one raw line; malformed JSON becomes an error response.
pub async fn handle_line(state: &AppState, line: &str) -> IpcResponse {
    match serde_json::from_str::<IpcRequest>(line) {
        Ok(request) => dispatch(state, request).await,
        Err(e) => {
            warn!("[ipc] malformed request: {}", e);
            IpcResponse::from_result(
                None,
                Err(CommandError::validation(format!("Malformed request: {}", e))),
            )
        }
    }
}

/// Serve requests until the reader reaches EOF. Blank lines are skipped.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        handled += 1;
    }

    info!("[ipc] input closed after {} request(s)", handled);
    Ok(())
}
