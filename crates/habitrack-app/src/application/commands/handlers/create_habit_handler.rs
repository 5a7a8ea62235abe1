use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::events::habit_events::HabitCreated;
use habitrack_domain::events::EventBus;
use habitrack_domain::habit::{Habit, HabitDetails, HabitRepository};
use habitrack_domain::shared::{Clock, DomainError, UserId};
use habitrack_domain::streak::Frequency;

pub const DEFAULT_KIND: &str = "build";

pub struct CreateHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl CreateHabitCommandHandler {
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
impl CommandHandler<CreateHabitCommand> for CreateHabitCommandHandler {
    type Result = CreateHabitResult;

    async fn handle(&self, cmd: CreateHabitCommand) -> Result<Self::Result, DomainError> {
        info!("[habit] create user_id={} name={}", cmd.user_id, cmd.name);

        let user_id = UserId::from_string(&cmd.user_id);
        let frequency = cmd
            .frequency
            .as_deref()
            .map(str::parse::<Frequency>)
            .transpose()?
            .unwrap_or_default();

        // New habits go to the end of the active list
        let order = self.habit_repo.count_active(&user_id).await?;

        let habit = Habit::new(
            user_id.clone(),
            cmd.name,
            cmd.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
            frequency,
            cmd.schedule.as_ref(),
            cmd.start_date.unwrap_or_else(Utc::now),
            HabitDetails {
                time_of_day: cmd.time_of_day,
                goal: cmd.goal,
                color: cmd.color,
                icon: cmd.icon,
                category: cmd.category,
            },
            order,
            self.clock.today(),
        )?;

        self.habit_repo.save(&habit).await?;

        info!(
            "[habit] created habit_id={} mode={} order={}",
            habit.id(),
            habit.schedule().mode(),
            order
        );

        let event = HabitCreated {
            habit_id: habit.id().clone(),
            user_id,
            name: habit.name().to_string(),
            occurred_at: Utc::now(),
        };
        self.event_bus.publish(Box::new(event)).await?;

        Ok(CreateHabitResult {
            habit_id: habit.id().as_str().to_string(),
        })
    }
}
