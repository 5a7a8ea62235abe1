use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::sync::Mutex;
use tracing::info;

use habitrack_infrastructure::config::{AppConfig, LogLevel};

/// Runtime view of the persisted configuration
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    config: Mutex<AppConfig>,
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        info!(
            "[config] loaded path={} log_level={} history_limit={}",
            config_path.display(),
            config.log_level,
            config.history_limit
        );

        Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config: Mutex::new(config),
            config_path,
        }
    }

    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Persist a new level; the logger picks it up on next start.
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        info!("[config] changing log level to {}", level);
        self.log_level.store(level as u8, Ordering::Relaxed);

        let mut config = self
            .config
            .lock()
            .map_err(|_| anyhow::anyhow!("config lock poisoned"))?;
        config.log_level = level;
        config.save(&self.config_path)?;

        info!("[config] saved path={}", self.config_path.display());
        Ok(())
    }

    pub fn snapshot(&self) -> Result<AppConfig> {
        self.config
            .lock()
            .map(|config| config.clone())
            .map_err(|_| anyhow::anyhow!("config lock poisoned"))
    }
}
