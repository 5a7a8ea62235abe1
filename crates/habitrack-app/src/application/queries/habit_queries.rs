use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::application::dtos::{HabitDto, StreakDto};
use crate::application::services::StreakService;
use habitrack_domain::habit::{Habit, HabitRepository};
use habitrack_domain::shared::dates::format_date;
use habitrack_domain::shared::{DomainError, HabitId, UserId};

/// Habit reads; streaks are computed live from the history as of the requested date.
pub struct HabitQueryService {
    habit_repo: Arc<dyn HabitRepository>,
    streak_service: Arc<StreakService>,
}

impl HabitQueryService {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, streak_service: Arc<StreakService>) -> Self {
        Self {
            habit_repo,
            streak_service,
        }
    }

    pub async fn list_habits(
        &self,
        user_id: &str,
        archived: bool,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<HabitDto>, DomainError> {
        let user_id = UserId::from_string(user_id);
        let habits = self.habit_repo.find_by_user(&user_id, archived).await?;

        let mut results = Vec::with_capacity(habits.len());
        for habit in &habits {
            results.push(self.to_dto(habit, as_of).await?);
        }

        info!(
            "[habit] list user_id={} archived={} total={}",
            user_id,
            archived,
            results.len()
        );
        Ok(results)
    }

    pub async fn get_habit(
        &self,
        user_id: &str,
        habit_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<HabitDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        self.to_dto(&habit, as_of).await
    }

    pub async fn get_streak(
        &self,
        user_id: &str,
        habit_id: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<StreakDto, DomainError> {
        let habit = self.load(user_id, habit_id).await?;
        let as_of = as_of.unwrap_or_else(|| self.streak_service.today());
        let snapshot = self
            .streak_service
            .compute(habit.user_id(), habit.id(), habit.frequency(), Some(as_of))
            .await?;

        Ok(StreakDto::new(
            habit_id,
            habit.frequency().as_str(),
            &format_date(as_of),
            snapshot,
        ))
    }

    async fn load(&self, user_id: &str, habit_id: &str) -> Result<Habit, DomainError> {
        self.habit_repo
            .find_by_id(&UserId::from_string(user_id), &HabitId::from_string(habit_id))
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))
    }

    async fn to_dto(&self, habit: &Habit, as_of: Option<NaiveDate>) -> Result<HabitDto, DomainError> {
        let streak = self
            .streak_service
            .compute(habit.user_id(), habit.id(), habit.frequency(), as_of)
            .await?;
        Ok(HabitDto::from_habit(habit, streak))
    }
}
