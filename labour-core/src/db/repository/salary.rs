//! Salary Repository

use super::{RepoError, RepoResult};
use shared::models::{Salary, SalaryListing, SalaryStatus, Worker};
use sqlx::SqlitePool;

const SALARY_SELECT: &str = "SELECT id, worker_id, month, base_salary, extra_hours, bonus_amount, total_salary, status FROM salary";

/// Computed amounts for a new record
#[derive(Debug, Clone, Copy)]
pub struct SalaryInsert<'a> {
    pub worker_id: i64,
    pub month: &'a str,
    pub base_salary: f64,
    pub extra_hours: f64,
    pub bonus_amount: f64,
    pub total_salary: f64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Salary>> {
    let sql = format!("{SALARY_SELECT} WHERE id = ?");
    let salary = sqlx::query_as::<_, Salary>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(salary)
}

/// Insert as `Draft`; an existing (worker, month) row is [`RepoError::Duplicate`]
pub async fn create(pool: &SqlitePool, data: SalaryInsert<'_>) -> RepoResult<Salary> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO salary (worker_id, month, base_salary, extra_hours, bonus_amount, total_salary, status) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.worker_id)
    .bind(data.month)
    .bind(data.base_salary)
    .bind(data.extra_hours)
    .bind(data.bonus_amount)
    .bind(data.total_salary)
    .bind(SalaryStatus::Draft)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create salary record".into()))
}

pub async fn update_status(pool: &SqlitePool, id: i64, status: SalaryStatus) -> RepoResult<Salary> {
    let rows = sqlx::query("UPDATE salary SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Salary {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Salary {id} not found")))
}

/// All records of a month with the worker's name, by department then name
pub async fn find_by_month(pool: &SqlitePool, month: &str) -> RepoResult<Vec<SalaryListing>> {
    let rows = sqlx::query_as::<_, SalaryListing>(
        "SELECT s.id, s.worker_id, s.month, s.base_salary, s.extra_hours, s.bonus_amount, s.total_salary, s.status, w.name AS worker_name, w.department AS department \
         FROM salary s JOIN worker w ON w.id = s.worker_id \
         WHERE s.month = ? ORDER BY w.department, w.name",
    )
    .bind(month)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Newest month first
pub async fn find_by_worker(pool: &SqlitePool, worker_id: i64) -> RepoResult<Vec<Salary>> {
    let sql = format!("{SALARY_SELECT} WHERE worker_id = ? ORDER BY month DESC");
    let rows = sqlx::query_as::<_, Salary>(&sql)
        .bind(worker_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_latest_for_worker(pool: &SqlitePool, worker_id: i64) -> RepoResult<Option<Salary>> {
    let sql = format!("{SALARY_SELECT} WHERE worker_id = ? ORDER BY month DESC LIMIT 1");
    let row = sqlx::query_as::<_, Salary>(&sql)
        .bind(worker_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Workers with no salary record for `month`
pub async fn find_workers_without_salary(pool: &SqlitePool, month: &str) -> RepoResult<Vec<Worker>> {
    let rows = sqlx::query_as::<_, Worker>(
        "SELECT w.id, w.name, w.email, w.password, w.contact, w.address, w.department, w.role, w.payment_method, w.status, w.joining_date \
         FROM worker w \
         WHERE NOT EXISTS (SELECT 1 FROM salary s WHERE s.worker_id = w.id AND s.month = ?) \
         ORDER BY w.department, w.name",
    )
    .bind(month)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
