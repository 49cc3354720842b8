//! Substitute Request Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request status.
///
/// The admin approval flag lives beside the status on
/// [`SubstituteRequest`]; it may only be true while the status is
/// [`SubstituteStatus::Accepted`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum SubstituteStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl SubstituteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for SubstituteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage request from a requester to a nominated substitute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SubstituteRequest {
    pub id: i64,
    pub requester_id: i64,
    pub substitute_id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub reason: String,
    pub status: SubstituteStatus,
    pub admin_approved: bool,
}

impl SubstituteRequest {
    /// `Rejected` and `Accepted{approved}` accept no further transitions
    pub fn is_terminal(&self) -> bool {
        match self.status {
            SubstituteStatus::Rejected => true,
            SubstituteStatus::Accepted => self.admin_approved,
            SubstituteStatus::Pending => false,
        }
    }

    /// Human-readable state, e.g. `Accepted (approved)`
    pub fn state_label(&self) -> String {
        if self.admin_approved {
            format!("{} (approved)", self.status)
        } else {
            self.status.to_string()
        }
    }
}

/// Submit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubstituteRequest {
    pub substitute_id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub reason: String,
}
