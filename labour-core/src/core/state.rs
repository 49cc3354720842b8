use crate::attendance::AttendanceRecorder;
use crate::core::{Config, WorkflowPolicy};
use crate::db::DbService;
use crate::leave::LeaveService;
use crate::payroll::PayrollService;
use crate::performance::FeedbackService;
use crate::substitute::SubstituteWorkflow;
use crate::tasks::TaskService;
use crate::workers::WorkerRegistry;
use shared::error::AppResult;

/// Engine state: configuration plus the database handle.
///
/// Holds no per-request data. Services are handed out by value and
/// share the pool, so they are cheap to create per call.
#[derive(Clone)]
pub struct LabourState {
    pub config: Config,
    pub db: DbService,
}

impl LabourState {
    /// Open the configured database and apply migrations
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path, config.db_max_connections).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    pub fn with_db(config: Config, db: DbService) -> Self {
        Self { config, db }
    }

    pub fn policy(&self) -> WorkflowPolicy {
        self.config.policy()
    }

    pub fn attendance(&self) -> AttendanceRecorder {
        AttendanceRecorder::new(self.db.pool.clone(), self.policy())
    }

    pub fn substitutes(&self) -> SubstituteWorkflow {
        SubstituteWorkflow::new(self.db.pool.clone(), self.policy())
    }

    pub fn workers(&self) -> WorkerRegistry {
        WorkerRegistry::new(self.db.pool.clone())
    }

    pub fn tasks(&self) -> TaskService {
        TaskService::new(self.db.pool.clone())
    }

    pub fn feedback(&self) -> FeedbackService {
        FeedbackService::new(self.db.pool.clone())
    }

    pub fn leave(&self) -> LeaveService {
        LeaveService::new(self.db.pool.clone())
    }

    pub fn payroll(&self) -> PayrollService {
        PayrollService::new(self.db.pool.clone(), self.config.overtime_bonus_rate)
    }
}
