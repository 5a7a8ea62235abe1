use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;

use habitrack_domain::check_in::CheckInRepository;
use habitrack_domain::shared::{Clock, DomainError, HabitId, UserId};
use habitrack_domain::streak::{
    Frequency, StreakCalculator, StreakRecord, StreakRepository, StreakSnapshot,
};

/// Glue between the completion history, the calculator and the snapshot cache
pub struct StreakService {
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_repo: Arc<dyn StreakRepository>,
    clock: Arc<dyn Clock>,
}

impl StreakService {
    pub fn new(
        check_in_repo: Arc<dyn CheckInRepository>,
        streak_repo: Arc<dyn StreakRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            check_in_repo,
            streak_repo,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Live snapshot from the stored history; nothing is written.
    pub async fn compute(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        frequency: Frequency,
        as_of: Option<NaiveDate>,
    ) -> Result<StreakSnapshot, DomainError> {
        let as_of = as_of.unwrap_or_else(|| self.today());
        let dates = self
            .check_in_repo
            .fetch_completions(user_id, habit_id, as_of)
            .await?;

        let snapshot = StreakCalculator::compute(dates, frequency, as_of);
        debug!(
            "[streak] compute habit_id={} frequency={} as_of={} current={} best={}",
            habit_id, frequency, as_of, snapshot.current_streak, snapshot.best_streak
        );
        Ok(snapshot)
    }

    /// Recompute and overwrite the cached snapshot of (user, habit).
    pub async fn refresh(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        frequency: Frequency,
        as_of: Option<NaiveDate>,
    ) -> Result<StreakSnapshot, DomainError> {
        let snapshot = self.compute(user_id, habit_id, frequency, as_of).await?;

        let record = StreakRecord::new(user_id.clone(), habit_id.clone(), snapshot);
        self.streak_repo.upsert(&record).await?;

        info!(
            "[streak] refreshed user_id={} habit_id={} current={} best={} last={:?}",
            user_id,
            habit_id,
            snapshot.current_streak,
            snapshot.best_streak,
            snapshot.last_completion_date
        );
        Ok(snapshot)
    }
}
