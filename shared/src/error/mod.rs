//! Unified error system for the labour engine
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`ErrorKind`]: The coarse kind every code folds into
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
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
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorKind};
//!
//! let err = AppError::new(ErrorCode::AlreadyCheckedIn);
//! assert_eq!(err.kind(), ErrorKind::AlreadyCheckedIn);
//!
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "email");
//! assert_eq!(err.kind(), ErrorKind::ValidationError);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorKind};
