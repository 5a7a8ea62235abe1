// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod check_in;
pub mod events;
pub mod habit;
pub mod schedule;
pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{CheckInId, DomainError, HabitId, UserId};
