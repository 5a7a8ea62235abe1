mod config_service;
mod streak_service;

pub use config_service::ConfigService;
pub use streak_service::StreakService;
