use crate::auth::load_worker;
use crate::core::WorkflowPolicy;
use crate::db::repository::{RepoError, attendance};
use crate::utils::time::now_local;
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::AttendanceRecord;
use shared::types::TimeOfDay;
use sqlx::SqlitePool;

/// Default page size for [`AttendanceRecorder::history`]
const HISTORY_LIMIT: i64 = 30;

/// Records daily presence. Stateless: every call reads and writes through the pool.
#[derive(Clone)]
pub struct AttendanceRecorder {
    pub(super) pool: SqlitePool,
    policy: WorkflowPolicy,
}

impl AttendanceRecorder {
    pub fn new(pool: SqlitePool, policy: WorkflowPolicy) -> Self {
        Self { pool, policy }
    }

    /// Open the worker's record for `date` at half attendance.
    ///
    /// A second check-in for the same day fails with `AlreadyCheckedIn`
    /// and leaves the first record as it was.
    pub async fn check_in(
        &self,
        worker_id: i64,
        date: NaiveDate,
        at: TimeOfDay,
    ) -> AppResult<AttendanceRecord> {
        load_worker(&self.pool, worker_id).await?;

        match attendance::insert_check_in(&self.pool, worker_id, date, at).await {
            Ok(record) => {
                tracing::info!(worker_id, %date, check_in = %at, record_id = record.id, "Checked in");
                Ok(record)
            }
            Err(RepoError::Duplicate(_)) => {
                tracing::warn!(worker_id, %date, "Rejected duplicate check-in");
                Err(already_checked_in(worker_id, date))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Close the worker's record for `date`.
    ///
    /// Hours are `at - check_in` on a 24h clock (a check-out past midnight
    /// wraps), rounded to 2 places. Attendance becomes a full day however
    /// short the shift. The first check-out is final unless the policy
    /// is in legacy mode, where a repeat overwrites it.
    pub async fn check_out(
        &self,
        worker_id: i64,
        date: NaiveDate,
        at: TimeOfDay,
    ) -> AppResult<AttendanceRecord> {
        load_worker(&self.pool, worker_id).await?;
        let record = attendance::find_for_day(&self.pool, worker_id, date)
            .await?
            .ok_or_else(|| not_checked_in(worker_id, date))?;
        let check_in = record.check_in.ok_or_else(|| not_checked_in(worker_id, date))?;

        let overwrite = self.policy.legacy_compat;
        if record.is_checked_out() && !overwrite {
            tracing::warn!(worker_id, %date, "Rejected repeated check-out");
            return Err(already_checked_out(&record));
        }

        let hours = at.hours_since(check_in);
        let rows = attendance::set_check_out(&self.pool, record.id, at, hours, !overwrite).await?;
        if rows == 0 {
            // Lost a race with a concurrent check-out
            let current = attendance::find_by_id(&self.pool, record.id)
                .await?
                .ok_or_else(|| not_checked_in(worker_id, date))?;
            tracing::warn!(worker_id, %date, "Concurrent check-out won");
            return Err(already_checked_out(&current));
        }

        if record.is_checked_out() {
            tracing::warn!(
                worker_id,
                %date,
                previous_hours = ?record.working_hours,
                working_hours = hours,
                "Check-out overwritten (legacy mode)"
            );
        } else {
            tracing::info!(worker_id, %date, check_out = %at, working_hours = hours, "Checked out");
        }

        attendance::find_by_id(&self.pool, record.id)
            .await?
            .ok_or_else(|| AppError::internal("Attendance record vanished after check-out"))
    }

    /// [`Self::check_in`] at the current local date and time
    pub async fn check_in_now(&self, worker_id: i64) -> AppResult<AttendanceRecord> {
        let (date, at) = now_local();
        self.check_in(worker_id, date, at).await
    }

    /// [`Self::check_out`] at the current local date and time
    pub async fn check_out_now(&self, worker_id: i64) -> AppResult<AttendanceRecord> {
        let (date, at) = now_local();
        self.check_out(worker_id, date, at).await
    }

    /// The worker's record for `date`, if any
    pub async fn for_day(
        &self,
        worker_id: i64,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        Ok(attendance::find_for_day(&self.pool, worker_id, date).await?)
    }

    /// Latest records first; `limit` defaults to 30
    pub async fn history(
        &self,
        worker_id: i64,
        limit: Option<i64>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let limit = limit.unwrap_or(HISTORY_LIMIT).max(1);
        Ok(attendance::find_history(&self.pool, worker_id, limit).await?)
    }
}

fn already_checked_in(worker_id: i64, date: NaiveDate) -> AppError {
    AppError::new(ErrorCode::AlreadyCheckedIn)
        .with_detail("worker_id", worker_id)
        .with_detail("date", date.to_string())
}

fn not_checked_in(worker_id: i64, date: NaiveDate) -> AppError {
    AppError::new(ErrorCode::NotCheckedIn)
        .with_detail("worker_id", worker_id)
        .with_detail("date", date.to_string())
}

fn already_checked_out(record: &AttendanceRecord) -> AppError {
    let mut err = AppError::new(ErrorCode::AlreadyCheckedOut)
        .with_detail("worker_id", record.worker_id)
        .with_detail("date", record.date.to_string());
    if let Some(hours) = record.working_hours {
        err = err.with_detail("working_hours", hours);
    }
    err
}
