mod normalizer;
mod value_objects;

#[cfg(test)]
mod normalizer_test;

pub use normalizer::{is_due, is_due_as_of, normalize, RawSchedule};
pub use value_objects::{Schedule, ScheduleMode};
