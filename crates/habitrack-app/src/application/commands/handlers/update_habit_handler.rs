use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::events::habit_events::HabitUpdated;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::{HabitDetails, HabitRepository};
use habitrack_domain::shared::{Clock, DomainError, HabitId, UserId};
use habitrack_domain::streak::Frequency;

pub struct UpdateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl UpdateHabitCommandHandler {
    pub fn new(
        habit_repo: Arc<dyn HabitRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            habit_repo,
            event_bus,
            clock,
        }
    }
}

#[async_trait]
impl CommandHandler<UpdateHabitCommand> for UpdateHabitCommandHandler {
    type Result = UpdateHabitResult;

    async fn handle(&self, cmd: UpdateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("[habit] update habit_id={}", cmd.habit_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let habit_id = HabitId::from_string(&cmd.habit_id);

        let mut habit = self
            .habit_repo
            .find_by_id(&user_id, &habit_id)
            .await?
            .ok_or_else(|| DomainError::HabitNotFound(cmd.habit_id.clone()))?;

        if let Some(name) = cmd.name {
            habit.rename(name)?;
        }
        if let Some(kind) = cmd.kind {
            habit.set_kind(kind);
        }

        let mut frequency_updated = false;
        if let Some(frequency) = cmd.frequency.as_deref() {
            let frequency: Frequency = frequency.parse()?;
            frequency_updated = frequency != habit.frequency();
            habit.set_frequency(frequency);
        }

        // A present schedule (null included) is re-normalized against today, so its start slides
        let schedule_updated = cmd.schedule.is_some();
        if let Some(raw) = cmd.schedule.as_ref() {
            habit.reschedule(Some(raw), self.clock.today());
        }

        if let Some(start_date) = cmd.start_date {
            habit.set_start_date(start_date);
        }

        habit.update_details(HabitDetails {
            time_of_day: cmd.time_of_day,
            goal: cmd.goal,
            color: cmd.color,
            icon: cmd.icon,
            category: cmd.category,
        });

        self.habit_repo.save(&habit).await?;

        info!(
            "[habit] updated habit_id={} schedule_updated={} frequency_updated={}",
            habit_id, schedule_updated, frequency_updated
        );

        let event = HabitUpdated {
            habit_id,
            user_id,
            schedule_updated,
            frequency_updated,
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(UpdateHabitResult {
            schedule_updated,
            frequency_updated,
        })
    }
}
