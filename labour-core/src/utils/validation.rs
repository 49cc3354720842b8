//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Person names, departments, leave types
pub const MAX_NAME_LEN: usize = 200;

/// Reasons, task details, feedback
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, payment method
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords, stored opaque
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Longest coverage a single substitute request may ask for
pub const MAX_SUBSTITUTE_HOURS: f64 = 24.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} must not be empty"))
                .with_detail("field", field),
        );
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain
pub fn validate_email(email: &str) -> AppResult<()> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(
            AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid email: {email}"))
                .with_detail("field", "email"),
        );
    }
    Ok(())
}

/// Finite and within `(0, max]`
pub fn validate_positive(value: f64, field: &str, max: f64) -> AppResult<()> {
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be greater than 0 and at most {max}, got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Finite and not negative
pub fn validate_non_negative(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} cannot be negative, got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// `start <= end`
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::with_message(
            ErrorCode::InvalidDateRange,
            format!("Start date {start} is after end date {end}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorKind;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Asha", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "contact", 5).is_ok());
        assert!(validate_optional_text(Some("12345"), "contact", 5).is_ok());
        assert!(validate_optional_text(Some("123456"), "contact", 5).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("a.b@example.com").is_ok());
        for bad in ["plain", "@example.com", "a@b", "a@@b.com", "a@.com", "a@com."] {
            let err = validate_email(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationError, "{bad}");
        }
    }

    #[test]
    fn test_numbers() {
        assert!(validate_positive(4.0, "hours", 24.0).is_ok());
        assert!(validate_positive(0.0, "hours", 24.0).is_err());
        assert!(validate_positive(24.5, "hours", 24.0).is_err());
        assert!(validate_positive(f64::NAN, "hours", 24.0).is_err());
        assert!(validate_non_negative(0.0, "extra_hours").is_ok());
        assert!(validate_non_negative(-1.0, "extra_hours").is_err());
    }

    #[test]
    fn test_date_range() {
        let a = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        assert!(validate_date_range(a, b).is_ok());
        assert!(validate_date_range(a, a).is_ok());
        assert_eq!(
            validate_date_range(b, a).unwrap_err().code,
            ErrorCode::InvalidDateRange
        );
    }
}
