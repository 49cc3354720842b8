//! Attendance Model

use crate::types::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance value of a record that has only been checked in
pub const HALF_DAY: f64 = 0.5;
/// Attendance value once checked out, regardless of hours worked
pub const FULL_DAY: f64 = 1.0;

/// One record per (worker, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceRecord {
    pub id: i64,
    pub worker_id: i64,
    pub date: NaiveDate,
    pub check_in: Option<TimeOfDay>,
    pub check_out: Option<TimeOfDay>,
    /// 0.0 absent, 0.5 checked in, 1.0 full day
    pub attendance_value: f64,
    /// Set at check-out, 2 decimal places
    pub working_hours: Option<f64>,
}

impl AttendanceRecord {
    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }
}

/// Monthly aggregate for one worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceSummary {
    pub worker_id: i64,
    /// `YYYY-MM`
    pub month: String,
    pub days_recorded: i64,
    pub total_attendance: f64,
    /// `None` when no record in the month has been checked out
    pub average_hours: Option<f64>,
}

/// Per-department aggregate over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentSummary {
    pub department: String,
    pub total_workers: i64,
    pub present_workers: i64,
    pub total_attendance_days: f64,
    pub average_hours: Option<f64>,
}

/// Per-date aggregate over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailySummary {
    pub date: NaiveDate,
    pub check_ins: i64,
    pub total_attendance: f64,
    pub average_hours: Option<f64>,
}
