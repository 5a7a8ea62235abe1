use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use habitrack_domain::shared::{DomainError, HabitId, StreakId, UserId};
use habitrack_domain::streak::{StreakRecord, StreakRepository, StreakSnapshot};

use crate::persistence::SqliteRepositoryBase;

#[derive(FromRow)]
struct StreakRow {
    id: String,
    user_id: String,
    habit_id: String,
    current_streak: i64,
    best_streak: i64,
    last_completion_date: Option<NaiveDate>,
    updated_at: DateTime<Utc>,
}

impl StreakRow {
    fn into_record(self) -> StreakRecord {
        StreakRecord::restore(
            StreakId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            HabitId::from_string(&self.habit_id),
            StreakSnapshot {
                current_streak: u32::try_from(self.current_streak).unwrap_or(0),
                best_streak: u32::try_from(self.best_streak).unwrap_or(0),
                last_completion_date: self.last_completion_date,
            },
            self.updated_at,
        )
    }
}

pub struct SqliteStreakRepository {
    base: SqliteRepositoryBase,
}

impl SqliteStreakRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl StreakRepository for SqliteStreakRepository {
    async fn upsert(&self, record: &StreakRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO streaks (id, user_id, habit_id, current_streak, best_streak,
                                 last_completion_date, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id, habit_id) DO UPDATE SET
                current_streak = ?4,
                best_streak = ?5,
                last_completion_date = ?6,
                updated_at = ?7
        "#;

        let snapshot = record.snapshot();

        self.base
            .execute(
                sqlx::query(query)
                    .bind(record.id().as_str())
                    .bind(record.user_id().as_str())
                    .bind(record.habit_id().as_str())
                    .bind(i64::from(snapshot.current_streak))
                    .bind(i64::from(snapshot.best_streak))
                    .bind(snapshot.last_completion_date)
                    .bind(record.updated_at()),
                "Upsert streak",
            )
            .await?;

        Ok(())
    }

    async fn find(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
    ) -> Result<Option<StreakRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, habit_id, current_streak, best_streak,
                   last_completion_date, updated_at
            FROM streaks
            WHERE user_id = ?1 AND habit_id = ?2
        "#;

        let row: Option<StreakRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(habit_id.as_str()),
                "Find streak",
            )
            .await?;

        Ok(row.map(|r| r.into_record()))
    }

    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError> {
        let query = "DELETE FROM streaks WHERE habit_id = ?1";

        self.base
            .execute(
                sqlx::query(query).bind(habit_id.as_str()),
                "Delete streaks by habit",
            )
            .await?;

        Ok(())
    }
}
