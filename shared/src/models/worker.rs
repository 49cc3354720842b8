//! Worker Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Department assigned when none is given at signup
pub const DEFAULT_DEPARTMENT: &str = "General";
/// Payment method assigned when none is given at signup
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Worker role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum WorkerRole {
    #[default]
    Worker,
    Manager,
    Admin,
}

impl WorkerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum WorkerStatus {
    #[default]
    Active,
    #[serde(rename = "On Leave")]
    #[cfg_attr(feature = "db", sqlx(rename = "On Leave"))]
    OnLeave,
    Inactive,
}

/// Worker entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Worker {
    pub id: i64,
    pub name: String,
    /// Unique across all workers
    pub email: String,
    /// Opaque credential, never leaves the engine
    #[serde(skip_serializing, default)]
    pub password: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    /// Free-text grouping key; the authorization boundary for managers
    pub department: String,
    pub role: WorkerRole,
    pub payment_method: String,
    pub status: WorkerStatus,
    pub joining_date: NaiveDate,
}

impl Worker {
    pub fn is_admin(&self) -> bool {
        self.role == WorkerRole::Admin
    }

    pub fn is_manager(&self) -> bool {
        self.role == WorkerRole::Manager
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkerStatus::Active
    }
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorker {
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact: Option<String>,
    pub address: Option<String>,
    /// Defaults to [`DEFAULT_DEPARTMENT`]
    pub department: Option<String>,
    /// Defaults to [`WorkerRole::Worker`]
    pub role: Option<WorkerRole>,
    /// Defaults to [`DEFAULT_PAYMENT_METHOD`]
    pub payment_method: Option<String>,
    pub joining_date: NaiveDate,
}

/// Self-service profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerProfileUpdate {
    pub contact: Option<String>,
    pub address: Option<String>,
}
