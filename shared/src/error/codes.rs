//! Unified error codes for the labour management engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Account errors
//! - 2xxx: Permission errors
//! - 3xxx: Worker errors
//! - 4xxx: Attendance errors
//! - 5xxx: Substitute request errors
//! - 6xxx: Task errors
//! - 7xxx: Leave errors
//! - 8xxx: Payroll / performance errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that callers in other
/// languages can match on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Account ====================
    /// Supplied current password does not match
    InvalidPassword = 1001,
    /// New password and its confirmation differ
    PasswordMismatch = 1002,
    /// Account is disabled (worker status is Inactive)
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Target worker belongs to another department
    DepartmentMismatch = 2006,

    // ==================== 3xxx: Worker ====================
    /// Worker not found
    WorkerNotFound = 3001,
    /// Email already registered
    EmailAlreadyExists = 3002,
    /// Worker is not active
    WorkerNotActive = 3003,

    // ==================== 4xxx: Attendance ====================
    /// Worker already checked in today
    AlreadyCheckedIn = 4001,
    /// Worker has not checked in today
    NotCheckedIn = 4002,
    /// Worker already checked out today
    AlreadyCheckedOut = 4003,
    /// Attendance record not found
    AttendanceNotFound = 4004,

    // ==================== 5xxx: Substitute ====================
    /// Substitute request not found
    SubstituteRequestNotFound = 5001,
    /// Workflow transition not allowed from the current state
    InvalidTransition = 5002,
    /// Requester nominated themselves as substitute
    SelfSubstitution = 5003,
    /// Acting worker is not the nominated substitute
    NotDesignatedSubstitute = 5004,

    // ==================== 6xxx: Task ====================
    /// Task not found
    TaskNotFound = 6001,

    // ==================== 7xxx: Leave ====================
    /// Leave request not found
    LeaveRequestNotFound = 7001,
    /// Leave end date before start date
    InvalidDateRange = 7002,
    /// Leave request already decided
    LeaveAlreadyDecided = 7003,

    // ==================== 8xxx: Payroll / Performance ====================
    /// Salary record not found
    SalaryNotFound = 8001,
    /// Salary record already exists for that month
    SalaryAlreadyExists = 8002,
    /// Performance record not found
    PerformanceNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Storage-level uniqueness or constraint violation
    PersistenceConflict = 9003,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Account
            ErrorCode::InvalidPassword => "Current password is incorrect",
            ErrorCode::PasswordMismatch => "New passwords do not match",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::DepartmentMismatch => "Worker belongs to another department",

            // Worker
            ErrorCode::WorkerNotFound => "Worker not found",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::WorkerNotActive => "Worker is not active",

            // Attendance
            ErrorCode::AlreadyCheckedIn => "Already checked in today",
            ErrorCode::NotCheckedIn => "Not checked in today",
            ErrorCode::AlreadyCheckedOut => "Already checked out today",
            ErrorCode::AttendanceNotFound => "Attendance record not found",

            // Substitute
            ErrorCode::SubstituteRequestNotFound => "Substitute request not found",
            ErrorCode::InvalidTransition => "Transition not allowed from the current state",
            ErrorCode::SelfSubstitution => "A worker cannot substitute for themselves",
            ErrorCode::NotDesignatedSubstitute => "Only the nominated substitute may accept",

            // Task
            ErrorCode::TaskNotFound => "Task not found",

            // Leave
            ErrorCode::LeaveRequestNotFound => "Leave request not found",
            ErrorCode::InvalidDateRange => "End date is before start date",
            ErrorCode::LeaveAlreadyDecided => "Leave request has already been decided",

            // Payroll / Performance
            ErrorCode::SalaryNotFound => "Salary record not found",
            ErrorCode::SalaryAlreadyExists => "Salary record already exists for this month",
            ErrorCode::PerformanceNotFound => "Performance record not found",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::PersistenceConflict => "Storage constraint violated",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Account
            1001 => Ok(ErrorCode::InvalidPassword),
            1002 => Ok(ErrorCode::PasswordMismatch),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::DepartmentMismatch),

            // Worker
            3001 => Ok(ErrorCode::WorkerNotFound),
            3002 => Ok(ErrorCode::EmailAlreadyExists),
            3003 => Ok(ErrorCode::WorkerNotActive),

            // Attendance
            4001 => Ok(ErrorCode::AlreadyCheckedIn),
            4002 => Ok(ErrorCode::NotCheckedIn),
            4003 => Ok(ErrorCode::AlreadyCheckedOut),
            4004 => Ok(ErrorCode::AttendanceNotFound),

            // Substitute
            5001 => Ok(ErrorCode::SubstituteRequestNotFound),
            5002 => Ok(ErrorCode::InvalidTransition),
            5003 => Ok(ErrorCode::SelfSubstitution),
            5004 => Ok(ErrorCode::NotDesignatedSubstitute),

            // Task
            6001 => Ok(ErrorCode::TaskNotFound),

            // Leave
            7001 => Ok(ErrorCode::LeaveRequestNotFound),
            7002 => Ok(ErrorCode::InvalidDateRange),
            7003 => Ok(ErrorCode::LeaveAlreadyDecided),

            // Payroll / Performance
            8001 => Ok(ErrorCode::SalaryNotFound),
            8002 => Ok(ErrorCode::SalaryAlreadyExists),
            8101 => Ok(ErrorCode::PerformanceNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::PersistenceConflict),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
