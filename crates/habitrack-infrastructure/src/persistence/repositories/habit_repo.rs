use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::warn;
use serde_json::Value;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use habitrack_domain::habit::{Habit, HabitDetails, HabitRepository};
use habitrack_domain::schedule::{normalize, Schedule};
use habitrack_domain::shared::{DomainError, HabitId, UserId};
use habitrack_domain::streak::Frequency;

use crate::persistence::{ResultExt, SqliteRepositoryBase};

const HABIT_COLUMNS: &str = "id, user_id, name, kind, frequency, schedule, time_of_day, \
     start_date, goal, color, icon, category, position, archived, created_at";

#[derive(FromRow)]
struct HabitRow {
    id: String,
    user_id: String,
    name: String,
    kind: String,
    frequency: String,
    schedule: String,
    time_of_day: Option<String>,
    start_date: DateTime<Utc>,
    goal: Option<String>,
    color: String,
    icon: Option<String>,
    category: Option<String>,
    position: i64,
    archived: bool,
    created_at: DateTime<Utc>,
}

impl HabitRow {
    fn into_habit(self) -> Habit {
        let schedule = decode_schedule(&self.id, &self.schedule, self.created_at);
        let goal = self
            .goal
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Value>(raw).ok());

        Habit::restore(
            HabitId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.name,
            self.kind,
            Frequency::from_stored(&self.frequency),
            schedule,
            self.start_date,
            HabitDetails {
                time_of_day: self.time_of_day,
                goal,
                color: Some(self.color),
                icon: self.icon,
                category: self.category,
            },
            self.position,
            self.archived,
            self.created_at,
        )
    }
}

/// Stored schedules are normalized; anything else is run back through the normalizer.
fn decode_schedule(habit_id: &str, raw: &str, created_at: DateTime<Utc>) -> Schedule {
    let value: Value = serde_json::from_str(raw).unwrap_or(Value::Null);
    match serde_json::from_value::<Schedule>(value.clone()) {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!(
                "[habit] stored schedule not canonical, re-normalizing habit_id={} error={}",
                habit_id, e
            );
            normalize(Some(&value), created_at.date_naive())
        }
    }
}

pub struct SqliteHabitRepository {
    base: SqliteRepositoryBase,
}

impl SqliteHabitRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl HabitRepository for SqliteHabitRepository {
    async fn save(&self, habit: &Habit) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO habits (id, user_id, name, kind, frequency, schedule, time_of_day,
                                start_date, goal, color, icon, category, position, archived, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ON CONFLICT(id) DO UPDATE SET
                name = ?3,
                kind = ?4,
                frequency = ?5,
                schedule = ?6,
                time_of_day = ?7,
                start_date = ?8,
                goal = ?9,
                color = ?10,
                icon = ?11,
                category = ?12,
                position = ?13,
                archived = ?14
        "#;

        let schedule = serde_json::to_string(habit.schedule()).to_repo_err("Encode schedule")?;
        let goal = habit
            .goal()
            .map(serde_json::to_string)
            .transpose()
            .to_repo_err("Encode goal")?;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(habit.id().as_str())
                    .bind(habit.user_id().as_str())
                    .bind(habit.name())
                    .bind(habit.kind())
                    .bind(habit.frequency().as_str())
                    .bind(schedule)
                    .bind(habit.time_of_day())
                    .bind(habit.start_date())
                    .bind(goal)
                    .bind(habit.color())
                    .bind(habit.icon())
                    .bind(habit.category())
                    .bind(habit.order())
                    .bind(habit.is_archived())
                    .bind(habit.created_at()),
                "Save habit",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &HabitId,
    ) -> Result<Option<Habit>, DomainError> {
        let query = format!(
            "SELECT {} FROM habits WHERE id = ?1 AND user_id = ?2",
            HABIT_COLUMNS
        );

        let row: Option<HabitRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Find habit by ID",
            )
            .await?;

        Ok(row.map(|r| r.into_habit()))
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        archived: bool,
    ) -> Result<Vec<Habit>, DomainError> {
        let query = format!(
            "SELECT {} FROM habits WHERE user_id = ?1 AND archived = ?2 ORDER BY position ASC, created_at ASC",
            HABIT_COLUMNS
        );

        let rows: Vec<HabitRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(archived),
                "Find habits by user",
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into_habit()).collect())
    }

    async fn count_active(&self, user_id: &UserId) -> Result<i64, DomainError> {
        let query = "SELECT COUNT(*) FROM habits WHERE user_id = ?1 AND archived = 0";

        self.base
            .fetch_scalar(
                sqlx::query_scalar(query).bind(user_id.as_str()),
                "Count active habits",
            )
            .await
    }

    async fn delete(&self, user_id: &UserId, id: &HabitId) -> Result<bool, DomainError> {
        let query = "DELETE FROM habits WHERE id = ?1 AND user_id = ?2";

        let result = self
            .base
            .execute(
                sqlx::query(query).bind(id.as_str()).bind(user_id.as_str()),
                "Delete habit",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
