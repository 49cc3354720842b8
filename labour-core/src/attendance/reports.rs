//! Read-side aggregates over attendance records

use super::AttendanceRecorder;
use crate::db::repository::attendance;
use crate::utils::validation::validate_date_range;
use chrono::NaiveDate;
use shared::error::AppResult;
use shared::models::{AttendanceSummary, DailySummary, DepartmentSummary};
use shared::types::YearMonth;
use shared::util::round2;

impl AttendanceRecorder {
    /// Records, summed attendance and mean working hours for one worker in `month`
    pub async fn summarize(&self, worker_id: i64, month: YearMonth) -> AppResult<AttendanceSummary> {
        let mut summary = attendance::summarize(
            &self.pool,
            worker_id,
            &month.to_string(),
            month.first_day(),
            month.next_first_day(),
        )
        .await?;
        summary.average_hours = summary.average_hours.map(round2);
        Ok(summary)
    }

    /// Per-department totals for `worker`-role staff over `[start, end]`
    pub async fn department_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DepartmentSummary>> {
        validate_date_range(start, end)?;
        let mut rows = attendance::department_summary(&self.pool, start, end).await?;
        for row in &mut rows {
            row.average_hours = row.average_hours.map(round2);
        }
        Ok(rows)
    }

    /// Per-date totals over `[start, end]`, newest first
    pub async fn daily_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailySummary>> {
        validate_date_range(start, end)?;
        let mut rows = attendance::daily_summary(&self.pool, start, end).await?;
        for row in &mut rows {
            row.average_hours = row.average_hours.map(round2);
        }
        Ok(rows)
    }
}
