//! Salary Model

use serde::{Deserialize, Serialize};

/// Payroll status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum SalaryStatus {
    #[default]
    Draft,
    Finalized,
    Paid,
}

/// Monthly salary record, one per (worker, month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Salary {
    pub id: i64,
    pub worker_id: i64,
    /// `YYYY-MM`
    pub month: String,
    pub base_salary: f64,
    pub extra_hours: f64,
    pub bonus_amount: f64,
    pub total_salary: f64,
    pub status: SalaryStatus,
}

/// Salary joined with the worker's name, for payroll listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SalaryListing {
    #[cfg_attr(feature = "db", sqlx(flatten))]
    #[serde(flatten)]
    pub salary: Salary,
    pub worker_name: String,
    pub department: String,
}
