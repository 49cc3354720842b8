//! Authorization
//!
//! - [`Actor`] - explicit caller identity
//! - [`guard`] - per-call role and department checks

pub mod actor;
pub mod guard;

pub use actor::Actor;
pub use guard::{load_actor, load_worker, require_admin, require_manager_of, require_self_or_manager_of};
