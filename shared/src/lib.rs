//! Shared types for the labour engine
//!
//! Entity models, status enumerations, clock/calendar value types and the
//! unified error system. SQL row mapping is gated behind the `db` feature.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use serde::{Deserialize, Serialize};
pub use types::{TimeOfDay, YearMonth};
