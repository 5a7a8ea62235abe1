mod analytics_queries;
mod check_in_queries;
mod habit_queries;

pub use analytics_queries::AnalyticsQueryService;
pub use check_in_queries::CheckInQueryService;
pub use habit_queries::HabitQueryService;
