use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::services::StreakService;
use habitrack_domain::events::habit_events::HabitUpdated;
use habitrack_domain::events::EventHandler;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::DomainError;

/// Recomputes the cached snapshot when a habit switches between daily and weekly.
///
/// Check-in writes refresh the snapshot themselves; this covers the one habit
/// edit that changes how the same history is counted.
#[derive(Clone)]
pub struct StreakRefreshEventHandler {
    habit_repo: Arc<dyn HabitRepository>,
    streak_service: Arc<StreakService>,
}

impl StreakRefreshEventHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>, streak_service: Arc<StreakService>) -> Self {
        Self {
            habit_repo,
            streak_service,
        }
    }
}

#[async_trait]
impl EventHandler<HabitUpdated> for StreakRefreshEventHandler {
    async fn handle(&self, event: &HabitUpdated) -> Result<(), DomainError> {
        if !event.frequency_updated {
            return Ok(());
        }

        let Some(habit) = self
            .habit_repo
            .find_by_id(&event.user_id, &event.habit_id)
            .await?
        else {
            return Ok(());
        };

        info!(
            "[streak] frequency changed, refreshing habit_id={} frequency={}",
            event.habit_id,
            habit.frequency()
        );

        self.streak_service
            .refresh(&event.user_id, &event.habit_id, habit.frequency(), None)
            .await?;
        Ok(())
    }
}
