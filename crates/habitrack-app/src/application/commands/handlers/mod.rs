mod archive_habit_handler;
mod create_habit_handler;
mod delete_check_in_handler;
mod delete_habit_handler;
mod record_check_in_handler;
mod update_habit_handler;


pub use archive_habit_handler::{ArchiveHabitCommandHandler, ReorderHabitCommandHandler};
pub use create_habit_handler::{CreateHabitCommandHandler, DEFAULT_KIND};
pub use delete_check_in_handler::DeleteCheckInCommandHandler;
pub use delete_habit_handler::DeleteHabitCommandHandler;
pub use record_check_in_handler::RecordCheckInCommandHandler;
pub use update_habit_handler::UpdateHabitCommandHandler;
