use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::check_in::CheckInRepository;
use habitrack_domain::events::habit_events::HabitDeleted;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId, UserId};
use habitrack_domain::streak::StreakRepository;

pub struct DeleteHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_repo: Arc<dyn StreakRepository>,
    event_bus: Arc<dyn EventBus>,
}

impl DeleteHabitCommandHandler {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        streak_repo: Arc<dyn StreakRepository>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            habit_repo,
            check_in_repo,
            streak_repo,
            event_bus,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteHabitCommand> for DeleteHabitCommandHandler {
    type Result = DeleteHabitResult;

    async fn handle(&self, cmd: DeleteHabitCommand) -> Result<Self::Result, DomainError> {
        info!("[habit] delete habit_id={}", cmd.habit_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let habit_id = HabitId::from_string(&cmd.habit_id);

        if !self.habit_repo.delete(&user_id, &habit_id).await? {
            return Err(DomainError::HabitNotFound(cmd.habit_id));
        }

        self.check_in_repo.delete_by_habit(&habit_id).await?;
        self.streak_repo.delete_by_habit(&habit_id).await?;

        info!("[habit] deleted habit_id={} with its history", habit_id);

        let event = HabitDeleted {
            habit_id,
            user_id,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(DeleteHabitResult { success: true })
    }
}
