use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::StreakService;
use habitrack_domain::check_in::{CheckIn, CheckInDomainService, CheckInRepository, CheckInStatus};
use habitrack_domain::events::habit_events::CheckInRecorded;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::HabitRepository;
use habitrack_domain::shared::{DomainError, HabitId, UserId};

/// Records a check-in and refreshes the habit's streak snapshot.
///
/// Rejections happen before anything is written, in this order: unknown
/// habit, date after today, date the schedule does not cover.
pub struct RecordCheckInCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    streak_service: Arc<StreakService>,
    event_bus: Arc<dyn EventBus>,
}

impl RecordCheckInCommandHandler {
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
impl CommandHandler<RecordCheckInCommand> for RecordCheckInCommandHandler {
    type Result = RecordCheckInResult;

    async fn handle(&self, cmd: RecordCheckInCommand) -> Result<Self::Result, DomainError> {
        info!(
            "[check_in] record habit_id={} date={} completed={} skipped={}",
            cmd.habit_id, cmd.date, cmd.completed, cmd.skipped
        );

        let user_id = UserId::from_string(&cmd.user_id);
        let habit_id = HabitId::from_string(&cmd.habit_id);

        let habit = self
            .habit_repo
            .find_by_id(&user_id, &habit_id)
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(cmd.habit_id.clone()))?;

        let today = self.streak_service.today();
        if let Err(e) = CheckInDomainService::can_check_in(&habit, cmd.date, today) {
            warn!(
                "[check_in] rejected habit_id={} date={} reason={}",
                habit_id, cmd.date, e
            );
            return Err(e);
        }

        let status = CheckInStatus {
            completed: cmd.completed,
            skipped: cmd.skipped,
        };

        let existing = self
            .check_in_repo
            .find_on_date(&user_id, &habit_id, cmd.date)
            .await?;
        let created = existing.is_none();

        let check_in = match existing {
            Some(mut check_in) => {
                check_in.record(status, cmd.value);
                check_in
            }
            None => CheckIn::new(
                user_id.clone(),
                habit_id.clone(),
                cmd.date,
                status,
                cmd.value,
            ),
        };

        self.check_in_repo.save(&check_in).await?;

        let streak = self
            .streak_service
            .refresh(&user_id, &habit_id, habit.frequency(), Some(today))
            .await?;

        info!(
            "[check_in] recorded check_in_id={} created={} current_streak={}",
            check_in.id(),
            created,
            streak.current_streak
        );

        let event = CheckInRecorded {
            check_in_id: check_in.id().clone(),
            habit_id,
            user_id,
            date: cmd.date,
            streak,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(RecordCheckInResult {
            check_in_id: check_in.id().as_str().to_string(),
            created,
            streak,
        })
    }
}
