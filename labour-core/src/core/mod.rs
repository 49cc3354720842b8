//! Core module - configuration and engine state
//!
//! - [`Config`] - environment-driven configuration
//! - [`WorkflowPolicy`] - compatibility switches
//! - [`LabourState`] - configuration plus database, hands out services

pub mod config;
pub mod state;

pub use config::{Config, WorkflowPolicy};
pub use state::LabourState;
