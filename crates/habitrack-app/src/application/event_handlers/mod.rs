mod activity_log_handler;
mod streak_refresh_handler;

pub use activity_log_handler::ActivityLogEventHandler;
pub use streak_refresh_handler::StreakRefreshEventHandler;
