//! Substitute Request Workflow
//!
//! ```text
//! Pending ──accept (substitute)──▶ Accepted ──approve (admin)──▶ Accepted{approved}
//!    │                               │
//!    └──────reject (admin)───────────┴──────▶ Rejected
//! ```
//!
//! `Rejected` and `Accepted{approved}` are terminal. Approval never sits
//! on anything but an accepted request (also enforced by a CHECK in the
//! schema).

mod workflow;

pub use workflow::SubstituteWorkflow;
