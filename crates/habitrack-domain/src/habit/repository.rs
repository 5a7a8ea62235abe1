use async_trait::async_trait;

use super::aggregate::Habit;
use crate::shared::{DomainError, HabitId, UserId};

#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Insert or replace a habit
    async fn save(&self, habit: &Habit) -> Result<(), DomainError>;

    /// Find a habit owned by `user_id`
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &HabitId,
    ) -> Result<Option<Habit>, DomainError>;

    /// A user's habits with the given archived flag, ordered by position
    async fn find_by_user(
        &self,
        user_id: &UserId,
        archived: bool,
    ) -> Result<Vec<Habit>, DomainError>;

    /// Number of non-archived habits a user has
    async fn count_active(&self, user_id: &UserId) -> Result<i64, DomainError>;

    /// Returns false when no habit matched
    async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError>;
}
