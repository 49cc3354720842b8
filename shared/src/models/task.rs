//! Task Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task status; any status may follow any other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    #[cfg_attr(feature = "db", sqlx(rename = "In Progress"))]
    InProgress,
    Completed,
    Delayed,
}

/// Task assigned by a manager to a worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Task {
    pub id: i64,
    pub worker_id: i64,
    pub details: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub assigned_date: NaiveDate,
}
