//! Worker Repository

use super::{RepoError, RepoResult};
use shared::models::{Worker, WorkerProfileUpdate, WorkerRole, WorkerStatus};
use sqlx::SqlitePool;

const WORKER_SELECT: &str = "SELECT id, name, email, password, contact, address, department, role, payment_method, status, joining_date FROM worker";

/// Fully-resolved insert row (defaults already applied)
#[derive(Debug, Clone)]
pub struct WorkerInsert<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub contact: Option<&'a str>,
    pub address: Option<&'a str>,
    pub department: &'a str,
    pub role: WorkerRole,
    pub payment_method: &'a str,
    pub joining_date: chrono::NaiveDate,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Worker>> {
    let sql = format!("{WORKER_SELECT} WHERE id = ?");
    let worker = sqlx::query_as::<_, Worker>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(worker)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Worker>> {
    let sql = format!("{WORKER_SELECT} WHERE email = ?");
    let worker = sqlx::query_as::<_, Worker>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(worker)
}

/// Insert with status `Active`. A taken email surfaces as [`RepoError::Duplicate`].
pub async fn create(pool: &SqlitePool, data: WorkerInsert<'_>) -> RepoResult<Worker> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO worker (name, email, password, contact, address, department, role, payment_method, status, joining_date) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.name)
    .bind(data.email)
    .bind(data.password)
    .bind(data.contact)
    .bind(data.address)
    .bind(data.department)
    .bind(data.role)
    .bind(data.payment_method)
    .bind(WorkerStatus::Active)
    .bind(data.joining_date)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create worker".into()))
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    data: &WorkerProfileUpdate,
) -> RepoResult<Worker> {
    let rows = sqlx::query(
        "UPDATE worker SET contact = COALESCE(?1, contact), address = COALESCE(?2, address) WHERE id = ?3",
    )
    .bind(data.contact.as_deref())
    .bind(data.address.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Worker {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Worker {id} not found")))
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: WorkerStatus) -> RepoResult<Worker> {
    let rows = sqlx::query("UPDATE worker SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Worker {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Worker {id} not found")))
}

/// Replace the stored password; `false` if no such worker
pub async fn update_password(pool: &SqlitePool, id: i64, password: &str) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE worker SET password = ? WHERE id = ?")
        .bind(password)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() == 1)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Worker>> {
    let sql = format!("{WORKER_SELECT} ORDER BY name, id");
    let workers = sqlx::query_as::<_, Worker>(&sql).fetch_all(pool).await?;
    Ok(workers)
}

pub async fn find_by_department(pool: &SqlitePool, department: &str) -> RepoResult<Vec<Worker>> {
    let sql = format!("{WORKER_SELECT} WHERE department = ? ORDER BY name, id");
    let workers = sqlx::query_as::<_, Worker>(&sql)
        .bind(department)
        .fetch_all(pool)
        .await?;
    Ok(workers)
}

/// Active `worker`-role colleagues in `department`, excluding `exclude_id`
pub async fn find_available_substitutes(
    pool: &SqlitePool,
    department: &str,
    exclude_id: i64,
) -> RepoResult<Vec<Worker>> {
    let sql = format!(
        "{WORKER_SELECT} WHERE department = ? AND id != ? AND role = ? AND status = ? ORDER BY name, id"
    );
    let workers = sqlx::query_as::<_, Worker>(&sql)
        .bind(department)
        .bind(exclude_id)
        .bind(WorkerRole::Worker)
        .bind(WorkerStatus::Active)
        .fetch_all(pool)
        .await?;
    Ok(workers)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM worker")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
