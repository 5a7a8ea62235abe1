mod aggregate;
mod repository;


pub use aggregate::{Habit, HabitDetails, DEFAULT_COLOR};
pub use repository::HabitRepository;
