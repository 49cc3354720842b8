//! Task Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Task, TaskStatus};
use sqlx::SqlitePool;

const TASK_SELECT: &str =
    "SELECT id, worker_id, details, deadline, status, assigned_date FROM task";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Task>> {
    let sql = format!("{TASK_SELECT} WHERE id = ?");
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(task)
}

pub async fn create(
    pool: &SqlitePool,
    worker_id: i64,
    details: &str,
    deadline: NaiveDate,
    assigned_date: NaiveDate,
) -> RepoResult<Task> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO task (worker_id, details, deadline, status, assigned_date) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(worker_id)
    .bind(details)
    .bind(deadline)
    .bind(TaskStatus::Pending)
    .bind(assigned_date)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create task".into()))
}

/// Guarded on the assignee the caller authorised against, so a task
/// reassigned in between is not touched.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    worker_id: i64,
    status: TaskStatus,
) -> RepoResult<Task> {
    let rows = sqlx::query("UPDATE task SET status = ? WHERE id = ? AND worker_id = ?")
        .bind(status)
        .bind(id)
        .bind(worker_id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Task {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Task {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64, worker_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM task WHERE id = ? AND worker_id = ?")
        .bind(id)
        .bind(worker_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Earliest deadline first
pub async fn find_by_worker(pool: &SqlitePool, worker_id: i64) -> RepoResult<Vec<Task>> {
    let sql = format!("{TASK_SELECT} WHERE worker_id = ? ORDER BY deadline, id");
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(worker_id)
        .fetch_all(pool)
        .await?;
    Ok(tasks)
}

/// Open (`Pending` / `In Progress`) tasks of everyone in `department`
pub async fn find_open_by_department(pool: &SqlitePool, department: &str) -> RepoResult<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT t.id, t.worker_id, t.details, t.deadline, t.status, t.assigned_date FROM task t JOIN worker w ON w.id = t.worker_id WHERE w.department = ? AND t.status IN (?, ?) ORDER BY t.deadline, t.id",
    )
    .bind(department)
    .bind(TaskStatus::Pending)
    .bind(TaskStatus::InProgress)
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}
