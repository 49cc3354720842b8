//! Leave Request Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave request status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Leave request over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveRequest {
    pub id: i64,
    pub worker_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free text, e.g. `Sick`, `Casual`
    pub leave_type: String,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    /// Admin who decided the request
    pub approved_by: Option<i64>,
    pub approval_date: Option<NaiveDate>,
}

impl LeaveRequest {
    /// Calendar days covered, both ends inclusive
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Submit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub reason: Option<String>,
}
