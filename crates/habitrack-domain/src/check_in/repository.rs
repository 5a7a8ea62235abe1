use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::aggregate::CheckIn;
use crate::shared::{CheckInId, DomainError, HabitId, UserId};

/// Listing filter; `None` fields do not constrain
#[derive(Debug, Clone, Default)]
pub struct CheckInFilter {
    pub habit_id: Option<HabitId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only rows with `completed` set, skipped or not; applied before `limit`
    pub completed_only: bool,
    pub limit: Option<u32>,
}

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert or update; at most one check-in exists per (user, habit, date).
    async fn save(&self, check_in: &CheckIn) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &CheckInId,
    ) -> Result<Option<CheckIn>, DomainError>;

    async fn find_on_date(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError>;

    /// A user's check-ins, most recent date first
    async fn list(
        &self,
        user_id: &UserId,
        filter: &CheckInFilter,
    ) -> Result<Vec<CheckIn>, DomainError>;

    /// Dates on or before `as_of` with a completed, non-skipped check-in.
    ///
    /// Must observe writes made earlier in the same request.
    async fn fetch_completions(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        as_of: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, DomainError>;

    async fn delete(&self, user_id: &UserId, id: &CheckInId) -> Result<(), DomainError>;

    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError>;
}
