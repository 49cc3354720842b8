//! Error types

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Coarse error kind every [`ErrorCode`] folds into.
///
/// Callers that only need to branch on "what went wrong" (retry, show a
/// message, report a bug) match on this instead of the full code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AlreadyCheckedIn,
    NotCheckedIn,
    AlreadyCheckedOut,
    Unauthorized,
    InvalidTransition,
    PersistenceConflict,
    ValidationError,
    Internal,
}

impl ErrorCode {
    /// Fold this code into its [`ErrorKind`]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::NotFound
            | ErrorCode::WorkerNotFound
            | ErrorCode::AttendanceNotFound
            | ErrorCode::SubstituteRequestNotFound
            | ErrorCode::TaskNotFound
            | ErrorCode::LeaveRequestNotFound
            | ErrorCode::SalaryNotFound
            | ErrorCode::PerformanceNotFound => ErrorKind::NotFound,

            ErrorCode::AlreadyCheckedIn => ErrorKind::AlreadyCheckedIn,
            ErrorCode::NotCheckedIn => ErrorKind::NotCheckedIn,
            ErrorCode::AlreadyCheckedOut => ErrorKind::AlreadyCheckedOut,

            ErrorCode::PermissionDenied
            | ErrorCode::RoleRequired
            | ErrorCode::AdminRequired
            | ErrorCode::DepartmentMismatch
            | ErrorCode::NotDesignatedSubstitute
            | ErrorCode::InvalidPassword
            | ErrorCode::AccountDisabled => ErrorKind::Unauthorized,

            ErrorCode::InvalidTransition | ErrorCode::LeaveAlreadyDecided => {
                ErrorKind::InvalidTransition
            }

            ErrorCode::AlreadyExists
            | ErrorCode::EmailAlreadyExists
            | ErrorCode::SalaryAlreadyExists
            | ErrorCode::PersistenceConflict
            | ErrorCode::DatabaseError => ErrorKind::PersistenceConflict,

            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::PasswordMismatch
            | ErrorCode::WorkerNotActive
            | ErrorCode::SelfSubstitution
            | ErrorCode::InvalidDateRange => ErrorKind::ValidationError,

            ErrorCode::Success
            | ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::ConfigError => ErrorKind::Internal,
        }
    }
}

/// Application error with structured error code and details
///
/// This is the error every engine operation returns:
/// - a standardized [`ErrorCode`] (and through it an [`ErrorKind`])
/// - a human-readable message
/// - optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (ids, current state, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Coarse kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an invalid transition error, recording the state it was attempted from
    pub fn invalid_transition(msg: impl Into<String>, from: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidTransition, msg).with_detail("from", from.into())
    }

    /// Create a persistence conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PersistenceConflict, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
