//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Account errors
/// - 2xxx: Permission errors
/// - 3xxx: Worker errors
/// - 4xxx: Attendance errors
/// - 5xxx: Substitute request errors
/// - 6xxx: Task errors
/// - 7xxx: Leave errors
/// - 8xxx: Payroll / performance errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Account errors (1xxx)
    Account,
    /// Permission errors (2xxx)
    Permission,
    /// Worker errors (3xxx)
    Worker,
    /// Attendance errors (4xxx)
    Attendance,
    /// Substitute request errors (5xxx)
    Substitute,
    /// Task errors (6xxx)
    Task,
    /// Leave errors (7xxx)
    Leave,
    /// Payroll / performance errors (8xxx)
    Payroll,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Account,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Worker,
            4000..5000 => Self::Attendance,
            5000..6000 => Self::Substitute,
            6000..7000 => Self::Task,
            7000..8000 => Self::Leave,
            8000..9000 => Self::Payroll,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Account => "account",
            Self::Permission => "permission",
            Self::Worker => "worker",
            Self::Attendance => "attendance",
            Self::Substitute => "substitute",
            Self::Task => "task",
            Self::Leave => "leave",
            Self::Payroll => "payroll",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
