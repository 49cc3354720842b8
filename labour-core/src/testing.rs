//! Test fixtures

use crate::core::WorkflowPolicy;
use crate::db::DbService;
use chrono::NaiveDate;
use shared::models::{Worker, WorkerRole};
use shared::types::TimeOfDay;
use sqlx::SqlitePool;

/// Fresh in-memory database with migrations applied
pub struct TestDb {
    pub pool: SqlitePool,
}

impl TestDb {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        Self { pool: db.pool }
    }
}

pub fn strict() -> WorkflowPolicy {
    WorkflowPolicy::default()
}

pub fn legacy() -> WorkflowPolicy {
    WorkflowPolicy {
        legacy_compat: true,
        ..WorkflowPolicy::default()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn time(s: &str) -> TimeOfDay {
    s.parse().expect("valid time")
}

/// Insert a worker directly; email derived from the name
pub async fn seed_worker(pool: &SqlitePool, name: &str, department: &str, role: WorkerRole) -> Worker {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO worker (name, email, password, department, role, joining_date) VALUES (?, ?, 'pw', ?, ?, '2024-01-01') RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(department)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed worker");

    crate::db::repository::worker::find_by_id(pool, id)
        .await
        .expect("load worker")
        .expect("worker exists")
}
