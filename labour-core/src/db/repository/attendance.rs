//! Attendance Repository

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{
    AttendanceRecord, AttendanceSummary, DailySummary, DepartmentSummary, FULL_DAY, HALF_DAY,
    WorkerRole,
};
use shared::types::TimeOfDay;
use sqlx::SqlitePool;

const ATTENDANCE_SELECT: &str = "SELECT id, worker_id, date, check_in, check_out, attendance_value, working_hours FROM attendance";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE id = ?");
    let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

pub async fn find_for_day(
    pool: &SqlitePool,
    worker_id: i64,
    date: NaiveDate,
) -> RepoResult<Option<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE worker_id = ? AND date = ?");
    let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(worker_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

/// Create the day's record at half attendance.
///
/// The `(worker_id, date)` unique index rejects a second writer with
/// [`RepoError::Duplicate`]; there is no pre-read.
pub async fn insert_check_in(
    pool: &SqlitePool,
    worker_id: i64,
    date: NaiveDate,
    at: TimeOfDay,
) -> RepoResult<AttendanceRecord> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO attendance (worker_id, date, check_in, attendance_value) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(worker_id)
    .bind(date)
    .bind(at)
    .bind(HALF_DAY)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create attendance record".into()))
}

/// Close the day: set check-out, hours and full attendance.
///
/// With `only_if_open` the write is guarded by `check_out IS NULL`; the
/// returned count is 0 when another check-out got there first.
pub async fn set_check_out(
    pool: &SqlitePool,
    id: i64,
    at: TimeOfDay,
    working_hours: f64,
    only_if_open: bool,
) -> RepoResult<u64> {
    let sql = if only_if_open {
        "UPDATE attendance SET check_out = ?, working_hours = ?, attendance_value = ? WHERE id = ? AND check_out IS NULL"
    } else {
        "UPDATE attendance SET check_out = ?, working_hours = ?, attendance_value = ? WHERE id = ?"
    };
    let rows = sqlx::query(sql)
        .bind(at)
        .bind(working_hours)
        .bind(FULL_DAY)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

/// Most recent first
pub async fn find_history(
    pool: &SqlitePool,
    worker_id: i64,
    limit: i64,
) -> RepoResult<Vec<AttendanceRecord>> {
    let sql = format!("{ATTENDANCE_SELECT} WHERE worker_id = ? ORDER BY date DESC LIMIT ?");
    let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(worker_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Records in `[start, end)`, oldest first
pub async fn find_in_range(
    pool: &SqlitePool,
    worker_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<AttendanceRecord>> {
    let sql =
        format!("{ATTENDANCE_SELECT} WHERE worker_id = ? AND date >= ? AND date < ? ORDER BY date");
    let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(worker_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Count, sum of values and mean hours over `[start, end)`
pub async fn summarize(
    pool: &SqlitePool,
    worker_id: i64,
    month: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<AttendanceSummary> {
    let summary = sqlx::query_as::<_, AttendanceSummary>(
        "SELECT ? AS worker_id, ? AS month, COUNT(*) AS days_recorded, TOTAL(attendance_value) AS total_attendance, AVG(working_hours) AS average_hours FROM attendance WHERE worker_id = ? AND date >= ? AND date < ?",
    )
    .bind(worker_id)
    .bind(month)
    .bind(worker_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(summary)
}

/// Mean attendance value and summed hours over `[start, end)`
pub async fn month_totals(
    pool: &SqlitePool,
    worker_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<(Option<f64>, f64)> {
    let totals: (Option<f64>, f64) = sqlx::query_as(
        "SELECT AVG(attendance_value), TOTAL(working_hours) FROM attendance WHERE worker_id = ? AND date >= ? AND date < ?",
    )
    .bind(worker_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

/// Per department of `worker`-role staff over `[start, end]`
pub async fn department_summary(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<DepartmentSummary>> {
    let rows = sqlx::query_as::<_, DepartmentSummary>(
        "SELECT w.department AS department, \
                COUNT(DISTINCT w.id) AS total_workers, \
                COUNT(DISTINCT a.worker_id) AS present_workers, \
                TOTAL(a.attendance_value) AS total_attendance_days, \
                AVG(a.working_hours) AS average_hours \
         FROM worker w \
         LEFT JOIN attendance a ON a.worker_id = w.id AND a.date >= ? AND a.date <= ? \
         WHERE w.role = ? \
         GROUP BY w.department \
         ORDER BY w.department",
    )
    .bind(start)
    .bind(end)
    .bind(WorkerRole::Worker)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Per date over `[start, end]`, newest first
pub async fn daily_summary(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<DailySummary>> {
    let rows = sqlx::query_as::<_, DailySummary>(
        "SELECT date, \
                COUNT(check_in) AS check_ins, \
                TOTAL(attendance_value) AS total_attendance, \
                AVG(working_hours) AS average_hours \
         FROM attendance \
         WHERE date >= ? AND date <= ? \
         GROUP BY date \
         ORDER BY date DESC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
