//! Tasks
//!
//! Managers assign work to workers of their own department. Status moves
//! freely between values; who may move it is what gets checked.

use crate::auth::{Actor, load_worker, require_manager_of, require_self_or_manager_of};
use crate::db::repository::task;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Task, TaskStatus};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct TaskService {
    pool: SqlitePool,
}

impl TaskService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Assign a new `Pending` task; the actor must manage the assignee's department
    pub async fn assign(
        &self,
        actor: &Actor,
        worker_id: i64,
        details: &str,
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Task> {
        validate_required_text(details, "details", MAX_NOTE_LEN)?;
        let assignee = load_worker(&self.pool, worker_id).await?;
        let manager = require_manager_of(&self.pool, actor, &assignee).await?;

        let created = task::create(&self.pool, assignee.id, details.trim(), deadline, today).await?;
        tracing::info!(
            task_id = created.id,
            worker_id = assignee.id,
            manager_id = manager.id,
            %deadline,
            "Task assigned"
        );
        Ok(created)
    }

    /// Set any status. Allowed for the assignee or a manager of the
    /// assignee's current department.
    pub async fn update_status(
        &self,
        actor: &Actor,
        task_id: i64,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let current = self.load(task_id).await?;
        let assignee = load_worker(&self.pool, current.worker_id).await?;
        require_self_or_manager_of(&self.pool, actor, &assignee).await?;

        let updated = task::update_status(&self.pool, task_id, assignee.id, status).await?;
        tracing::info!(
            task_id,
            actor_id = actor.worker_id,
            from = ?current.status,
            to = ?updated.status,
            "Task status changed"
        );
        Ok(updated)
    }

    /// Remove a task; the actor must manage the assignee's department
    pub async fn delete(&self, actor: &Actor, task_id: i64) -> AppResult<()> {
        let current = self.load(task_id).await?;
        let assignee = load_worker(&self.pool, current.worker_id).await?;
        require_manager_of(&self.pool, actor, &assignee).await?;

        if !task::delete(&self.pool, task_id, assignee.id).await? {
            return Err(not_found(task_id));
        }
        tracing::info!(task_id, manager_id = actor.worker_id, "Task deleted");
        Ok(())
    }

    pub async fn get(&self, task_id: i64) -> AppResult<Task> {
        self.load(task_id).await
    }

    /// Earliest deadline first
    pub async fn list_for_worker(&self, worker_id: i64) -> AppResult<Vec<Task>> {
        Ok(task::find_by_worker(&self.pool, worker_id).await?)
    }

    /// Open tasks across a department
    pub async fn list_open_for_department(&self, department: &str) -> AppResult<Vec<Task>> {
        Ok(task::find_open_by_department(&self.pool, department).await?)
    }

    async fn load(&self, task_id: i64) -> AppResult<Task> {
        task::find_by_id(&self.pool, task_id)
            .await?
            .ok_or_else(|| not_found(task_id))
    }
}

fn not_found(task_id: i64) -> AppError {
    AppError::with_message(ErrorCode::TaskNotFound, format!("Task {task_id} not found"))
}
