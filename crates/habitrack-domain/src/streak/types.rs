use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::{DomainError, HabitId, StreakId, UserId};

/// Cadence a habit's streak is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }

    /// Stored values other than `weekly` count as daily.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(DomainError::InvalidInput(format!("Unknown frequency: {s}"))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StreakSnapshot {
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completion_date: Option<NaiveDate>,
}

impl StreakSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Cached snapshot for one (user, habit) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRecord {
    id: StreakId,
    user_id: UserId,
    habit_id: HabitId,
    snapshot: StreakSnapshot,
    updated_at: DateTime<Utc>,
}

impl StreakRecord {
    pub fn new(user_id: UserId, habit_id: HabitId, snapshot: StreakSnapshot) -> Self {
        Self {
            id: StreakId::new(),
            user_id,
            habit_id,
            snapshot,
            updated_at: Utc::now(),
        }
    }

    pub fn restore(
        id: StreakId,
        user_id: UserId,
        habit_id: HabitId,
        snapshot: StreakSnapshot,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            habit_id,
            snapshot,
            updated_at,
        }
    }

    pub fn id(&self) -> &StreakId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn habit_id(&self) -> &HabitId {
        &self.habit_id
    }

    pub fn snapshot(&self) -> &StreakSnapshot {
        &self.snapshot
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
