mod app_config;
mod log_level;

pub use app_config::{AppConfig, ConfigError, CONFIG_FILE_NAME, ENV_DB, ENV_LOG_DIR, ENV_LOG_LEVEL};
pub use log_level::LogLevel;
