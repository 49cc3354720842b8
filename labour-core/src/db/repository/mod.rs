//! Repository Module
//!
//! Free functions over `&SqlitePool`, one module per table. Every
//! check-then-act sequence ends in a conditional write whose
//! `rows_affected()` tells the caller whether it won.

pub mod attendance;
pub mod leave;
pub mod performance;
pub mod salary;
pub mod substitute;
pub mod task;
pub mod worker;

use shared::error::{AppError, ErrorCode};
use sqlx::error::ErrorKind as SqlxErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique index violation
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Foreign key, CHECK or NOT NULL violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                SqlxErrorKind::UniqueViolation => {
                    return RepoError::Duplicate(db_err.message().to_string());
                }
                SqlxErrorKind::ForeignKeyViolation
                | SqlxErrorKind::CheckViolation
                | SqlxErrorKind::NotNullViolation => {
                    return RepoError::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) | RepoError::Constraint(msg) => {
                AppError::with_message(ErrorCode::PersistenceConflict, msg)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database(msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
