//! Actor identity passed into every mutating operation

use serde::{Deserialize, Serialize};
use shared::models::WorkerRole;

/// Who is performing an operation.
///
/// Supplied by the caller per call; the engine keeps no session. The role
/// is a claim: guards re-load the worker row and trust only what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub worker_id: i64,
    pub role: WorkerRole,
}

impl Actor {
    pub fn new(worker_id: i64, role: WorkerRole) -> Self {
        Self { worker_id, role }
    }

    pub fn worker(worker_id: i64) -> Self {
        Self::new(worker_id, WorkerRole::Worker)
    }

    pub fn manager(worker_id: i64) -> Self {
        Self::new(worker_id, WorkerRole::Manager)
    }

    pub fn admin(worker_id: i64) -> Self {
        Self::new(worker_id, WorkerRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == WorkerRole::Admin
    }
}

impl From<&shared::models::Worker> for Actor {
    fn from(worker: &shared::models::Worker) -> Self {
        Self::new(worker.id, worker.role)
    }
}
