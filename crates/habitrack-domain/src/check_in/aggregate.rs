use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{CheckInId, HabitId, UserId};

/// Outcome carried by a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInStatus {
    pub completed: bool,
    pub skipped: bool,
}

impl CheckInStatus {
    pub fn completed() -> Self {
        Self {
            completed: true,
            skipped: false,
        }
    }

    pub fn skipped() -> Self {
        Self {
            completed: false,
            skipped: true,
        }
    }

    /// Only completed, non-skipped check-ins feed a streak.
    pub fn counts_toward_streak(&self) -> bool {
        self.completed && !self.skipped
    }
}

/// One check-in per (user, habit, date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIn {
    id: CheckInId,
    user_id: UserId,
    habit_id: HabitId,
    date: NaiveDate,
    status: CheckInStatus,
    value: Option<f64>,
    created_at: DateTime<Utc>,
}

impl CheckIn {
    pub fn new(
        user_id: UserId,
        habit_id: HabitId,
        date: NaiveDate,
        status: CheckInStatus,
        value: Option<f64>,
    ) -> Self {
        Self {
            id: CheckInId::new(),
            user_id,
            habit_id,
            date,
            status,
            value,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: CheckInId,
        user_id: UserId,
        habit_id: HabitId,
        date: NaiveDate,
        status: CheckInStatus,
        value: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            habit_id,
            date,
            status,
            value,
            created_at,
        }
    }

    pub fn id(&self) -> &CheckInId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> CheckInStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status.completed
    }

    pub fn is_skipped(&self) -> bool {
        self.status.skipped
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Re-recording a date overwrites the outcome and keeps identity.
    pub fn record(&mut self, status: CheckInStatus, value: Option<f64>) {
        self.status = status;
        self.value = value;
    }
}
