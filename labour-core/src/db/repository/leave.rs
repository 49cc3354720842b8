//! Leave Request Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use sqlx::SqlitePool;

const LEAVE_SELECT: &str = "SELECT id, worker_id, start_date, end_date, leave_type, reason, status, approved_by, approval_date FROM leave_request";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<LeaveRequest>> {
    let sql = format!("{LEAVE_SELECT} WHERE id = ?");
    let leave = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(leave)
}

pub async fn create(
    pool: &SqlitePool,
    worker_id: i64,
    data: &NewLeaveRequest,
) -> RepoResult<LeaveRequest> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO leave_request (worker_id, start_date, end_date, leave_type, reason, status) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(worker_id)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(&data.leave_type)
    .bind(data.reason.as_deref())
    .bind(LeaveStatus::Pending)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create leave request".into()))
}

/// `Pending` → `status`, recording the deciding admin; 0 rows if already decided
pub async fn decide(
    pool: &SqlitePool,
    id: i64,
    status: LeaveStatus,
    decided_by: i64,
    decided_on: NaiveDate,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE leave_request SET status = ?, approved_by = ?, approval_date = ? WHERE id = ? AND status = ?",
    )
    .bind(status)
    .bind(decided_by)
    .bind(decided_on)
    .bind(id)
    .bind(LeaveStatus::Pending)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Newest start date first
pub async fn find_by_worker(pool: &SqlitePool, worker_id: i64) -> RepoResult<Vec<LeaveRequest>> {
    let sql = format!("{LEAVE_SELECT} WHERE worker_id = ? ORDER BY start_date DESC, id DESC");
    let rows = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(worker_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Oldest first
pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<LeaveRequest>> {
    let sql = format!("{LEAVE_SELECT} WHERE status = ? ORDER BY start_date, id");
    let rows = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(LeaveStatus::Pending)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
