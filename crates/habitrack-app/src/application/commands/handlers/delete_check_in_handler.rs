use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::StreakService;
use habitrack_domain::check_in::CheckInRepository;
use habitrack_domain::events::habit_events::CheckInDeleted;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{CheckInId, DomainError, UserId};

pub struct DeleteCheckInCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_service: Arc<StreakService>,
    event_bus: Arc<dyn EventBus>,
}

impl DeleteCheckInCommandHandler {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        streak_service: Arc<StreakService>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            habit_repo,
            check_in_repo,
            streak_service,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteCheckInCommand> for DeleteCheckInCommandHandler {
    type Result = DeleteCheckInResult;

    async fn handle(&self, cmd: DeleteCheckInCommand) -> Result<Self::Result, DomainError> {
        info!("[check_in] delete check_in_id={}", cmd.check_in_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let check_in_id = CheckInId::from_string(&cmd.check_in_id);

        let check_in = self
            .check_in_repo
            .find_by_id(&user_id, &check_in_id)
            .await?
            .ok_or_else(|| DomainError::CheckInNotFound(cmd.check_in_id.clone()))?;

        self.check_in_repo.delete(&user_id, &check_in_id).await?;

        let habit_id = check_in.habit_id().clone();
        let frequency = self
            .habit_repo
            .find_by_id(&user_id, &habit_id)
            .await?
            .map(|habit| habit.frequency())
            .unwrap_or_default();

        let streak = self
            .streak_service
            .refresh(&user_id, &habit_id, frequency, None)
            .await?;

        let event = CheckInDeleted {
            check_in_id,
            habit_id: habit_id.clone(),
            user_id,
            date: check_in.date(),
            streak,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(DeleteCheckInResult {
            habit_id: habit_id.as_str().to_string(),
            streak,
        })
    }
}
