use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{CheckInId, HabitId, UserId};
use crate::streak::StreakSnapshot;

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a habit is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCreated {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitCreated);

/// Event fired when a habit is updated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitUpdated {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub schedule_updated: bool,
    pub frequency_updated: bool,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitUpdated);

/// Event fired when a habit and its history are deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDeleted {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(HabitDeleted);

/// Event fired after a check-in is stored and the streak refreshed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRecorded {
    pub check_in_id: CheckInId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub streak: StreakSnapshot,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(CheckInRecorded);

/// Event fired after a check-in is removed and the streak refreshed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInDeleted {
    pub check_in_id: CheckInId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub streak: StreakSnapshot,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(CheckInDeleted);
