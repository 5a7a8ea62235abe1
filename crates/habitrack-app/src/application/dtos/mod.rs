mod analytics_dto;
mod check_in_dto;
mod habit_dto;
mod streak_dto;

pub use analytics_dto::*;
pub use check_in_dto::*;
pub use habit_dto::*;
pub use streak_dto::*;
