//! Utilities - logging, input validation and clock helpers

pub mod logger;
pub mod time;
pub mod validation;
