//! Performance Model

use serde::{Deserialize, Serialize};

/// Monthly performance record, one per (worker, month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Performance {
    pub id: i64,
    pub worker_id: i64,
    /// `YYYY-MM`
    pub month: String,
    pub attendance_percentage: f64,
    pub total_hours: f64,
    pub feedback: Option<String>,
}
