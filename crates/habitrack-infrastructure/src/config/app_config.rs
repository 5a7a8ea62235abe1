use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::LogLevel;
use crate::persistence::repositories::DEFAULT_HISTORY_LIMIT;

pub const CONFIG_FILE_NAME: &str = "habitrack.json";
pub const ENV_DB: &str = "HABITRACK_DB";
pub const ENV_LOG_DIR: &str = "HABITRACK_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "HABITRACK_LOG_LEVEL";

const APP_DIR: &str = "habitrack";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistent configuration, stored as JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LogLevel,
    /// Most completion rows read per streak recompute
    pub history_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            database_path: data_dir.join("habitrack.db"),
            log_dir: data_dir.join("logs"),
            log_level: LogLevel::Info,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// `<config dir>/habitrack/habitrack.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE_NAME)
    }

    /// Read the file at `path`. A missing file or malformed JSON yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(
                "[config] ignoring malformed config path={} error={}",
                path.display(),
                e
            );
            Self::default()
        }))
    }

    /// `load` followed by the process environment overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `HABITRACK_*` overrides; empty values and unknown levels are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(db) = var(ENV_DB) {
            self.database_path = PathBuf::from(db);
        }
        if let Some(dir) = var(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            match level.parse() {
                Ok(level) => self.log_level = level,
                Err(e) => warn!("[config] {} ignored: {}", ENV_LOG_LEVEL, e),
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
