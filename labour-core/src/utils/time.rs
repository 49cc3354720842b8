//! Clock helpers
//!
//! The engine takes dates and times as arguments. Only the `*_now`
//! convenience entry points read the wall clock, through here.

use chrono::{Local, NaiveDate};
use shared::error::{AppError, AppResult};
use shared::types::{TimeOfDay, YearMonth};

/// Current local date and time of day
pub fn now_local() -> (NaiveDate, TimeOfDay) {
    let now = Local::now().naive_local();
    (now.date(), TimeOfDay::from_naive(now.time()))
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a month string (YYYY-MM)
pub fn parse_month(month: &str) -> AppResult<YearMonth> {
    month
        .parse()
        .map_err(|e: shared::types::InvalidYearMonth| AppError::validation(e.to_string()))
}
