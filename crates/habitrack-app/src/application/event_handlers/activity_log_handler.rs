use async_trait::async_trait;
use log::info;

use habitrack_domain::events::habit_events::{
    CheckInDeleted, CheckInRecorded, HabitCreated, HabitDeleted,
};
use habitrack_domain::events::EventHandler;
use habitrack_domain::shared::dates::format_date;
use habitrack_domain::shared::DomainError;

/// Writes one `[activity]` line per habit or check-in change to the log.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogEventHandler;

impl ActivityLogEventHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler<HabitCreated> for ActivityLogEventHandler {
    async fn handle(&self, event: &HabitCreated) -> Result<(), DomainError> {
        info!(
            "[activity] habit created user_id={} habit_id={} name={:?}",
            event.user_id, event.habit_id, event.name
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler<HabitDeleted> for ActivityLogEventHandler {
    async fn handle(&self, event: &HabitDeleted) -> Result<(), DomainError> {
        info!(
            "[activity] habit deleted user_id={} habit_id={}",
            event.user_id, event.habit_id
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler<CheckInRecorded> for ActivityLogEventHandler {
    async fn handle(&self, event: &CheckInRecorded) -> Result<(), DomainError> {
        info!(
            "[activity] check-in recorded user_id={} habit_id={} date={} current={} best={}",
            event.user_id,
            event.habit_id,
            format_date(event.date),
            event.streak.current_streak,
            event.streak.best_streak
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler<CheckInDeleted> for ActivityLogEventHandler {
    async fn handle(&self, event: &CheckInDeleted) -> Result<(), DomainError> {
        info!(
            "[activity] check-in deleted user_id={} habit_id={} date={} current={}",
            event.user_id,
            event.habit_id,
            format_date(event.date),
            event.streak.current_streak
        );
        Ok(())
    }
}
