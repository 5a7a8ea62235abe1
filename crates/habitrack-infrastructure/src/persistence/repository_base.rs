use habitrack_domain::shared::DomainError;
use log::error;
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

/// Shared pool access for the SQLite repositories.
///
/// Every call takes a short `context` naming the operation so that storage
/// failures surface as `DomainError::Repository("<context>: <cause>")`.
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        query
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, context))
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, context))
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, context))
    }

    pub async fn fetch_scalar<'q, O>(
        &self,
        query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<O, DomainError>
    where
        O: Send + Unpin,
        (O,): for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error(e, context))
    }
}

fn map_sqlx_error(err: sqlx::Error, context: &str) -> DomainError {
    error!("[db] {} failed: {}", context, err);
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            DomainError::DataIntegrity(format!("{}: {}", context, db.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DomainError::Serialization(format!("{}: {}", context, err))
        }
        _ => DomainError::Repository(format!("{}: {}", context, err)),
    }
}
