use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schedule::{normalize, Schedule};
use crate::shared::{DomainError, HabitId, UserId};
use crate::streak::Frequency;

pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Presentation attributes that carry no scheduling meaning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitDetails {
    pub time_of_day: Option<String>,
    pub goal: Option<Value>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    user_id: UserId,
    name: String,
    kind: String,
    frequency: Frequency,
    schedule: Schedule,
    time_of_day: Option<String>,
    start_date: DateTime<Utc>,
    goal: Option<Value>,
    color: String,
    icon: Option<String>,
    category: Option<String>,
    order: i64,
    archived: bool,
    created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit; the raw schedule is normalized against `today`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        name: String,
        kind: String,
        frequency: Frequency,
        raw_schedule: Option<&Value>,
        start_date: DateTime<Utc>,
        details: HabitDetails,
        order: i64,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let name = validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            user_id,
            name,
            kind,
            frequency,
            schedule: normalize(raw_schedule, today),
            time_of_day: details.time_of_day,
            start_date,
            goal: details.goal,
            color: details.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: details.icon,
            category: details.category,
            order,
            archived: false,
            created_at: Utc::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: HabitId,
        user_id: UserId,
        name: String,
        kind: String,
        frequency: Frequency,
        schedule: Schedule,
        start_date: DateTime<Utc>,
        details: HabitDetails,
        order: i64,
        archived: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            kind,
            frequency,
            schedule,
            time_of_day: details.time_of_day,
            start_date,
            goal: details.goal,
            color: details.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            icon: details.icon,
            category: details.category,
            order,
            archived,
            created_at,
        }
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn time_of_day(&self) -> Option<&str> {
        self.time_of_day.as_deref()
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn goal(&self) -> Option<&Value> {
        self.goal.as_ref()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn details(&self) -> HabitDetails {
        HabitDetails {
            time_of_day: self.time_of_day.clone(),
            goal: self.goal.clone(),
            color: Some(self.color.clone()),
            icon: self.icon.clone(),
            category: self.category.clone(),
        }
    }

    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = validate_name(&name)?;
        Ok(())
    }

    pub fn set_kind(&mut self, kind: String) {
        self.kind = kind;
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
    }

    pub fn set_start_date(&mut self, start_date: DateTime<Utc>) {
        self.start_date = start_date;
    }

    /// Replace the schedule. `start` slides to `today` even when the payload
    /// is an already-normalized schedule.
    pub fn reschedule(&mut self, raw_schedule: Option<&Value>, today: NaiveDate) {
        self.schedule = normalize(raw_schedule, today);
    }

    /// Fields set to `Some` replace the current value.
    pub fn update_details(&mut self, details: HabitDetails) {
        if let Some(time_of_day) = details.time_of_day {
            self.time_of_day = Some(time_of_day);
        }
        if let Some(goal) = details.goal {
            self.goal = Some(goal);
        }
        if let Some(color) = details.color {
            self.color = color;
        }
        if let Some(icon) = details.icon {
            self.icon = Some(icon);
        }
        if let Some(category) = details.category {
            self.category = Some(category);
        }
    }

    pub fn move_to(&mut self, order: i64) {
        self.order = order;
    }

    pub fn archive(&mut self) {
        self.archived = true;
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "Habit name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
