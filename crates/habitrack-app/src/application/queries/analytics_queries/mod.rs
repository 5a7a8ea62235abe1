use chrono::{Duration, NaiveDate};
use log::info;
use std::sync::Arc;

use crate::application::dtos::{HabitAnalyticsDto, HeatmapDto, InsightsDto, WeekOverviewDto};
use crate::application::services::StreakService;
use habitrack_domain::check_in::{CheckInFilter, CheckInRepository};
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::dates::week_start;
use habitrack_domain::shared::{DomainError, HabitId, UserId};

mod habit_analytics;
mod heatmap;
mod insights;
mod week_overview;

pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;
pub const DEFAULT_HEATMAP_DAYS: u32 = 365;
/// Check-ins per habit considered by the insights
pub const INSIGHT_WINDOW: u32 = 30;

const ANALYTICS_ROW_CAP: u32 = 1000;
const HEATMAP_ROW_CAP: u32 = 10_000;

pub struct AnalyticsQueryService {
    habit_repo: Arc<dyn HabitRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_service: Arc<StreakService>,
}

impl AnalyticsQueryService {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        streak_service: Arc<StreakService>,
    ) -> Self {
        Self {
            habit_repo,
            check_in_repo,
            streak_service,
        }
    }

    /// Completion statistics of one habit over the `days` days before today, today included
    pub async fn habit_analytics(
        &self,
        user_id: &str,
        habit_id: &str,
        days: Option<u32>,
    ) -> Result<HabitAnalyticsDto, DomainError> {
        let user = UserId::from_string(user_id);
        let habit = self
            .habit_repo
            .find_by_id(&user, &HabitId::from_string(habit_id))
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))?;

        let days = days.unwrap_or(DEFAULT_ANALYTICS_DAYS);
        let (start, end) = self.window(days);

        let check_ins = self
            .check_in_repo
            .list(
                &user,
                &CheckInFilter {
                    habit_id: Some(habit.id().clone()),
                    start_date: Some(start),
                    end_date: Some(end),
                    completed_only: false,
                    limit: Some(ANALYTICS_ROW_CAP),
                },
            )
            .await?;

        let streak = self
            .streak_service
            .compute(&user, habit.id(), habit.frequency(), Some(end))
            .await?;

        let dto = habit_analytics::summarize(habit_id, days, &check_ins, streak);
        info!(
            "[analytics] habit_id={} days={} completed={} rate={}",
            habit_id, days, dto.completed_count, dto.completion_rate
        );
        Ok(dto)
    }

    /// Completed check-ins per day across all of a user's habits
    pub async fn heatmap(&self, user_id: &str, days: Option<u32>) -> Result<HeatmapDto, DomainError> {
        let (start, end) = self.window(days.unwrap_or(DEFAULT_HEATMAP_DAYS));

        let check_ins = self
            .check_in_repo
            .list(
                &UserId::from_string(user_id),
                &CheckInFilter {
                    habit_id: None,
                    start_date: Some(start),
                    end_date: Some(end),
                    completed_only: true,
                    limit: Some(HEATMAP_ROW_CAP),
                },
            )
            .await?;

        Ok(heatmap::build(start, end, &check_ins))
    }

    /// Scheduled vs. completed active habits for each day of the week containing `date`
    pub async fn week_overview(
        &self,
        user_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<WeekOverviewDto, DomainError> {
        let user = UserId::from_string(user_id);
        let today = self.streak_service.today();
        let monday = week_start(date.unwrap_or(today));
        let sunday = monday
            .checked_add_signed(Duration::days(6))
            .unwrap_or(NaiveDate::MAX);

        let habits = self.habit_repo.find_by_user(&user, false).await?;
        let check_ins = self
            .check_in_repo
            .list(
                &user,
                &CheckInFilter {
                    start_date: Some(monday),
                    end_date: Some(sunday),
                    ..Default::default()
                },
            )
            .await?;

        Ok(week_overview::build(monday, &habits, &check_ins, today))
    }

    pub async fn insights(&self, user_id: &str) -> Result<InsightsDto, DomainError> {
        let user = UserId::from_string(user_id);
        let habits = self.habit_repo.find_by_user(&user, false).await?;

        let mut results = Vec::new();
        for habit in &habits {
            let recent = self
                .check_in_repo
                .list(
                    &user,
                    &CheckInFilter {
                        habit_id: Some(habit.id().clone()),
                        limit: Some(INSIGHT_WINDOW),
                        ..Default::default()
                    },
                )
                .await?;
            results.extend(insights::for_habit(habit, &recent));
        }

        info!(
            "[analytics] insights user_id={} habits={} insights={}",
            user_id,
            habits.len(),
            results.len()
        );
        Ok(InsightsDto { insights: results })
    }

    /// `[today - days, today]`
    fn window(&self, days: u32) -> (NaiveDate, NaiveDate) {
        let end = self.streak_service.today();
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }
}
