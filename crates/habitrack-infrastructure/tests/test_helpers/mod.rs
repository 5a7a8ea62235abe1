#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use sqlx::SqlitePool;

use habitrack_domain::habit::{Habit, HabitDetails};
use habitrack_domain::shared::UserId;
use habitrack_domain::streak::Frequency;
use habitrack_infrastructure::persistence::Database;

/// Migrated private in-memory database
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn habit(user_id: &UserId, name: &str, raw_schedule: Option<Value>, order: i64) -> Habit {
    Habit::new(
        user_id.clone(),
        name.to_string(),
        "build".to_string(),
        Frequency::Daily,
        raw_schedule.as_ref(),
        Utc::now(),
        HabitDetails::default(),
        order,
        d("2024-01-01"),
    )
    .expect("valid habit")
}
