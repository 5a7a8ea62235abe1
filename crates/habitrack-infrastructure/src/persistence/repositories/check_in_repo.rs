use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeSet;
use std::sync::Arc;

use habitrack_domain::check_in::{CheckIn, CheckInFilter, CheckInRepository, CheckInStatus};
use habitrack_domain::shared::{CheckInId, DomainError, HabitId, UserId};

use crate::persistence::SqliteRepositoryBase;

/// Most completion rows read for one streak recompute
pub const DEFAULT_HISTORY_LIMIT: u32 = 1000;

#[derive(FromRow)]
struct CheckInRow {
    id: String,
    user_id: String,
    habit_id: String,
    date: NaiveDate,
    completed: bool,
    skipped: bool,
    value: Option<f64>,
    created_at: DateTime<Utc>,
}

impl CheckInRow {
    fn into_check_in(self) -> CheckIn {
        CheckIn::restore(
            CheckInId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            HabitId::from_string(&self.habit_id),
            self.date,
            CheckInStatus {
                completed: self.completed,
                skipped: self.skipped,
            },
            self.value,
            self.created_at,
        )
    }
}

pub struct SqliteCheckInRepository {
    base: SqliteRepositoryBase,
    history_limit: u32,
}

impl SqliteCheckInRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_history_limit(pool, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(pool: Arc<SqlitePool>, history_limit: u32) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
            history_limit,
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn save(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO check_ins (id, user_id, habit_id, date, completed, skipped, value, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(user_id, habit_id, date) DO UPDATE SET
                completed = ?5,
                skipped = ?6,
                value = ?7
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(check_in.id().as_str())
                    .bind(check_in.user_id().as_str())
                    .bind(check_in.habit_id().as_str())
                    .bind(check_in.date())
                    .bind(check_in.status().completed)
                    .bind(check_in.status().skipped)
                    .bind(check_in.value())
                    .bind(check_in.created_at()),
                "Save check-in",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &CheckInId,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = r#"
            SELECT id, user_id, habit_id, date, completed, skipped, value, created_at
            FROM check_ins
            WHERE id = ?1 AND user_id = ?2
        "#;

        let row: Option<CheckInRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Find check-in by ID",
            )
            .await?;

        Ok(row.map(|r| r.into_check_in()))
    }

    async fn find_on_date(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = r#"
            SELECT id, user_id, habit_id, date, completed, skipped, value, created_at
            FROM check_ins
            WHERE user_id = ?1 AND habit_id = ?2 AND date = ?3
        "#;

        let row: Option<CheckInRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(habit_id.as_str())
                    .bind(date),
                "Find check-in on date",
            )
            .await?;

        Ok(row.map(|r| r.into_check_in()))
    }

    async fn list(
        &self,
        user_id: &UserId,
        filter: &CheckInFilter,
    ) -> Result<Vec<CheckIn>, DomainError> {
        // NULL parameters leave their condition open
        let query = r#"
            SELECT id, user_id, habit_id, date, completed, skipped, value, created_at
            FROM check_ins
            WHERE user_id = ?1
              AND (?2 IS NULL OR habit_id = ?2)
              AND (?3 IS NULL OR date >= ?3)
              AND (?4 IS NULL OR date <= ?4)
              AND (?5 = 0 OR completed = 1)
            ORDER BY date DESC, created_at DESC
            LIMIT ?6
        "#;

        let limit = filter.limit.map(i64::from).unwrap_or(-1);

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(filter.habit_id.as_ref().map(|id| id.as_str()))
                    .bind(filter.start_date)
                    .bind(filter.end_date)
                    .bind(filter.completed_only)
                    .bind(limit),
                "List check-ins",
            )
            .await?;

        Ok(rows.into_iter().map(|r| r.into_check_in()).collect())
    }

    async fn fetch_completions(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        as_of: NaiveDate,
    ) -> Result<BTreeSet<NaiveDate>, DomainError> {
        let query = r#"
            SELECT date FROM check_ins
            WHERE user_id = ?1 AND habit_id = ?2
              AND completed = 1 AND skipped = 0
              AND date <= ?3
            ORDER BY date DESC
            LIMIT ?4
        "#;

        let dates: Vec<(NaiveDate,)> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(habit_id.as_str())
                    .bind(as_of)
                    .bind(i64::from(self.history_limit)),
                "Fetch completion history",
            )
            .await?;

        Ok(dates.into_iter().map(|(date,)| date).collect())
    }

    async fn delete(&self, user_id: &UserId, id: &CheckInId) -> Result<(), DomainError> {
        let query = "DELETE FROM check_ins WHERE id = ?1 AND user_id = ?2";

        self.base
            .execute(
                sqlx::query(query).bind(id.as_str()).bind(user_id.as_str()),
                "Delete check-in",
            )
            .await?;

        Ok(())
    }

    async fn delete_by_habit(&self, habit_id: &HabitId) -> Result<(), DomainError> {
        let query = "DELETE FROM check_ins WHERE habit_id = ?1";

        self.base
            .execute(
                sqlx::query(query).bind(habit_id.as_str()),
                "Delete check-ins by habit",
            )
            .await?;

        Ok(())
    }
}
