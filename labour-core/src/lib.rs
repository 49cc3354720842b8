//! Labour Core - workforce attendance and substitution engine
//!
//! # Overview
//!
//! - **Attendance** (`attendance`): check-in / check-out, daily value and hours
//! - **Substitutes** (`substitute`): request → accept → admin approval workflow
//! - **Workers** (`workers`): registration, profiles, colleague lookup
//! - **Tasks / Feedback / Leave / Payroll**: department-scoped manager and admin actions
//! - **Database** (`db`): embedded SQLite via sqlx, migrations on open
//!
//! # Layout
//!
//! ```text
//! labour-core/src/
//! ├── core/          # config, policy, engine state
//! ├── auth/          # actor identity and per-call guards
//! ├── db/            # pool, migrations, repositories
//! ├── attendance/    # recorder and reports
//! ├── substitute/    # substitution workflow
//! ├── workers/ tasks/ performance/ leave/ payroll/
//! └── utils/         # logging, validation, clock
//! ```

pub mod attendance;
pub mod auth;
pub mod core;
pub mod db;
pub mod leave;
pub mod payroll;
pub mod performance;
pub mod substitute;
pub mod tasks;
pub mod utils;
pub mod workers;

#[cfg(test)]
mod testing;

pub use attendance::AttendanceRecorder;
pub use auth::Actor;
pub use core::{Config, LabourState, WorkflowPolicy};
pub use leave::LeaveService;
pub use payroll::PayrollService;
pub use performance::FeedbackService;
pub use substitute::SubstituteWorkflow;
pub use tasks::TaskService;
pub use workers::WorkerRegistry;

pub use shared::error::{AppError, AppResult, ErrorCode, ErrorKind};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security events go to their own target so they can be filtered separately
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            severity = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
