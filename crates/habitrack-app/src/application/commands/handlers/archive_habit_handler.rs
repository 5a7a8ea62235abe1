use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::habit_commands::*;
use habitrack_domain::habit::{Habit, HabitRepository};
use habitrack_domain::shared::{DomainError, HabitId, UserId};

async fn load_habit(
    habit_repo: &dyn HabitRepository,
    user_id: &str,
    habit_id: &str,
) -> Result<Habit, DomainError> {
    habit_repo
        .find_by_id(&UserId::from_string(user_id), &HabitId::from_string(habit_id))
        .await?
        .ok_or_else(|| DomainError::HabitNotFound(habit_id.to_string()))
}

pub struct ArchiveHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
}

impl ArchiveHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>) -> Self {
        Self { habit_repo }
    }
}

#[async_trait]
impl CommandHandler<ArchiveHabitCommand> for ArchiveHabitCommandHandler {
    type Result = HabitStateResult;

    async fn handle(&self, cmd: ArchiveHabitCommand) -> Result<Self::Result, DomainError> {
        let mut habit = load_habit(self.habit_repo.as_ref(), &cmd.user_id, &cmd.habit_id).await?;

        habit.archive();
        self.habit_repo.save(&habit).await?;

        info!("[habit] archived habit_id={}", cmd.habit_id);
        Ok(HabitStateResult { success: true })
    }
}

pub struct ReorderHabitCommandHandler {
    habit_repo: Arc<dyn HabitRepository>,
}

impl ReorderHabitCommandHandler {
    pub fn new(habit_repo: Arc<dyn HabitRepository>) -> Self {
        Self { habit_repo }
    }
}

#[async_trait]
impl CommandHandler<ReorderHabitCommand> for ReorderHabitCommandHandler {
    type Result = HabitStateResult;

    async fn handle(&self, cmd: ReorderHabitCommand) -> Result<Self::Result, DomainError> {
        let mut habit = load_habit(self.habit_repo.as_ref(), &cmd.user_id, &cmd.habit_id).await?;

        habit.move_to(cmd.order);
        self.habit_repo.save(&habit).await?;

        info!("[habit] moved habit_id={} order={}", cmd.habit_id, cmd.order);
        Ok(HabitStateResult { success: true })
    }
}
