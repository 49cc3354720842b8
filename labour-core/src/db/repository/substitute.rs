//! Substitute Request Repository
//!
//! Transitions are single conditional UPDATEs keyed on the expected
//! current state. A zero row count means the row moved on (or vanished)
//! between the caller's read and this write.

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{SubstituteRequest, SubstituteStatus};
use sqlx::SqlitePool;

const REQUEST_SELECT: &str = "SELECT id, requester_id, substitute_id, date, hours, reason, status, admin_approved FROM substitute_request";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SubstituteRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE id = ?");
    let request = sqlx::query_as::<_, SubstituteRequest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(request)
}

/// Insert in state `Pending`, not approved
pub async fn create(
    pool: &SqlitePool,
    requester_id: i64,
    substitute_id: i64,
    date: NaiveDate,
    hours: f64,
    reason: &str,
) -> RepoResult<SubstituteRequest> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO substitute_request (requester_id, substitute_id, date, hours, reason, status, admin_approved) VALUES (?, ?, ?, ?, ?, ?, 0) RETURNING id",
    )
    .bind(requester_id)
    .bind(substitute_id)
    .bind(date)
    .bind(hours)
    .bind(reason)
    .bind(SubstituteStatus::Pending)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create substitute request".into()))
}

/// `Pending` → `Accepted`, only for the designated substitute
pub async fn mark_accepted(pool: &SqlitePool, id: i64, substitute_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE substitute_request SET status = ? WHERE id = ? AND substitute_id = ? AND status = ?",
    )
    .bind(SubstituteStatus::Accepted)
    .bind(id)
    .bind(substitute_id)
    .bind(SubstituteStatus::Pending)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// `Accepted{false}` → `Accepted{true}`
pub async fn mark_approved(pool: &SqlitePool, id: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE substitute_request SET admin_approved = 1 WHERE id = ? AND status = ? AND admin_approved = 0",
    )
    .bind(id)
    .bind(SubstituteStatus::Accepted)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

/// Any non-rejected state → `Rejected`, clearing approval.
///
/// Unless `include_approved` is set, an approved request is left alone.
pub async fn mark_rejected(pool: &SqlitePool, id: i64, include_approved: bool) -> RepoResult<u64> {
    let sql = if include_approved {
        "UPDATE substitute_request SET status = ?, admin_approved = 0 WHERE id = ? AND status != ?"
    } else {
        "UPDATE substitute_request SET status = ?, admin_approved = 0 WHERE id = ? AND status != ? AND admin_approved = 0"
    };
    let rows = sqlx::query(sql)
        .bind(SubstituteStatus::Rejected)
        .bind(id)
        .bind(SubstituteStatus::Rejected)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

/// Requests raised by `requester_id`, newest date first
pub async fn find_by_requester(
    pool: &SqlitePool,
    requester_id: i64,
) -> RepoResult<Vec<SubstituteRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE requester_id = ? ORDER BY date DESC, id DESC");
    let requests = sqlx::query_as::<_, SubstituteRequest>(&sql)
        .bind(requester_id)
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

/// Requests naming `substitute_id` as cover, newest date first
pub async fn find_by_substitute(
    pool: &SqlitePool,
    substitute_id: i64,
) -> RepoResult<Vec<SubstituteRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE substitute_id = ? ORDER BY date DESC, id DESC");
    let requests = sqlx::query_as::<_, SubstituteRequest>(&sql)
        .bind(substitute_id)
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

/// Accepted but not yet approved, oldest date first
pub async fn find_awaiting_approval(pool: &SqlitePool) -> RepoResult<Vec<SubstituteRequest>> {
    let sql = format!("{REQUEST_SELECT} WHERE status = ? AND admin_approved = 0 ORDER BY date, id");
    let requests = sqlx::query_as::<_, SubstituteRequest>(&sql)
        .bind(SubstituteStatus::Accepted)
        .fetch_all(pool)
        .await?;
    Ok(requests)
}

pub async fn count_awaiting_approval(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM substitute_request WHERE status = ? AND admin_approved = 0",
    )
    .bind(SubstituteStatus::Accepted)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
