//! Performance Repository

use super::{RepoError, RepoResult};
use shared::models::Performance;
use sqlx::SqlitePool;

const PERFORMANCE_SELECT: &str = "SELECT id, worker_id, month, attendance_percentage, total_hours, feedback FROM performance";

pub async fn find_for_month(
    pool: &SqlitePool,
    worker_id: i64,
    month: &str,
) -> RepoResult<Option<Performance>> {
    let sql = format!("{PERFORMANCE_SELECT} WHERE worker_id = ? AND month = ?");
    let record = sqlx::query_as::<_, Performance>(&sql)
        .bind(worker_id)
        .bind(month)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

/// Set feedback on the (worker, month) row, creating it with the given
/// attendance figures if absent. Existing figures are left untouched.
pub async fn upsert_feedback(
    pool: &SqlitePool,
    worker_id: i64,
    month: &str,
    attendance_percentage: f64,
    total_hours: f64,
    feedback: &str,
) -> RepoResult<Performance> {
    sqlx::query(
        "INSERT INTO performance (worker_id, month, attendance_percentage, total_hours, feedback) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT (worker_id, month) DO UPDATE SET feedback = excluded.feedback",
    )
    .bind(worker_id)
    .bind(month)
    .bind(attendance_percentage)
    .bind(total_hours)
    .bind(feedback)
    .execute(pool)
    .await?;

    find_for_month(pool, worker_id, month)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to save performance record".into()))
}

/// Newest month first
pub async fn find_by_worker(pool: &SqlitePool, worker_id: i64) -> RepoResult<Vec<Performance>> {
    let sql = format!("{PERFORMANCE_SELECT} WHERE worker_id = ? ORDER BY month DESC");
    let records = sqlx::query_as::<_, Performance>(&sql)
        .bind(worker_id)
        .fetch_all(pool)
        .await?;
    Ok(records)
}
