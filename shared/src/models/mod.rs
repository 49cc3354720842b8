//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Month keys are `YYYY-MM` strings; see [`crate::types::YearMonth`].

pub mod attendance;
pub mod leave;
pub mod performance;
pub mod salary;
pub mod substitute;
pub mod task;
pub mod worker;

// Re-exports
pub use attendance::*;
pub use leave::*;
pub use performance::*;
pub use salary::*;
pub use substitute::*;
pub use task::*;
pub use worker::*;
