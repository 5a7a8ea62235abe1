use async_trait::async_trait;

use super::types::StreakRecord;
use crate::shared::{DomainError, HabitId, UserId};

/// Snapshot cache writer/reader, keyed by (user, habit)
#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Insert or overwrite the snapshot for the record's (user, habit) pair.
    async fn upsert(&self, record: &StreakRecord) -> Result<(), DomainError>;

    async fn find(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<Option<StreakRecord>, DomainError>;

    /// Drop every snapshot of a habit (habit deletion).
    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError>;
}
