mod calculator;
mod repository;
mod types;

#[cfg(test)]
mod calculator_test;

pub use calculator::StreakCalculator;
pub use repository::StreakRepository;
pub use types::{Frequency, StreakRecord, StreakSnapshot};
