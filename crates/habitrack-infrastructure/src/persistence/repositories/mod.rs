mod check_in_repo;
mod habit_repo;
mod streak_repo;

pub use check_in_repo::{SqliteCheckInRepository, DEFAULT_HISTORY_LIMIT};
pub use habit_repo::SqliteHabitRepository;
pub use streak_repo::SqliteStreakRepository;
