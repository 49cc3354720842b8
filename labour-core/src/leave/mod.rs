//! Leave Requests
//!
//! Workers submit; admins approve or reject while the request is still
//! pending. Leave balances are not tracked.

use crate::auth::{Actor, load_actor, require_admin};
use crate::db::repository::leave;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_date_range, validate_optional_text,
    validate_required_text,
};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct LeaveService {
    pool: SqlitePool,
}

impl LeaveService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// New `Pending` request for the actor over `[start_date, end_date]`
    pub async fn submit(&self, actor: &Actor, data: NewLeaveRequest) -> AppResult<LeaveRequest> {
        let worker = load_actor(&self.pool, actor).await?;
        validate_date_range(data.start_date, data.end_date)?;
        validate_required_text(&data.leave_type, "leave_type", MAX_NAME_LEN)?;
        validate_optional_text(data.reason.as_deref(), "reason", MAX_NOTE_LEN)?;

        let created = leave::create(&self.pool, worker.id, &data).await?;
        tracing::info!(
            leave_id = created.id,
            worker_id = worker.id,
            start = %created.start_date,
            end = %created.end_date,
            leave_type = %created.leave_type,
            "Leave requested"
        );
        Ok(created)
    }

    pub async fn approve(
        &self,
        actor: &Actor,
        leave_id: i64,
        today: NaiveDate,
    ) -> AppResult<LeaveRequest> {
        self.decide(actor, leave_id, LeaveStatus::Approved, today).await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        leave_id: i64,
        today: NaiveDate,
    ) -> AppResult<LeaveRequest> {
        self.decide(actor, leave_id, LeaveStatus::Rejected, today).await
    }

    pub async fn list_for_worker(&self, worker_id: i64) -> AppResult<Vec<LeaveRequest>> {
        Ok(leave::find_by_worker(&self.pool, worker_id).await?)
    }

    pub async fn list_pending(&self) -> AppResult<Vec<LeaveRequest>> {
        Ok(leave::find_pending(&self.pool).await?)
    }

    async fn decide(
        &self,
        actor: &Actor,
        leave_id: i64,
        status: LeaveStatus,
        today: NaiveDate,
    ) -> AppResult<LeaveRequest> {
        let admin = require_admin(&self.pool, actor).await?;
        let rows = leave::decide(&self.pool, leave_id, status, admin.id, today).await?;
        let current = leave::find_by_id(&self.pool, leave_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::LeaveRequestNotFound,
                    format!("Leave request {leave_id} not found"),
                )
            })?;

        if rows == 0 {
            return Err(AppError::new(ErrorCode::LeaveAlreadyDecided)
                .with_detail("leave_id", leave_id)
                .with_detail("from", format!("{:?}", current.status)));
        }

        tracing::info!(leave_id, admin_id = admin.id, to = ?status, "Leave request decided");
        Ok(current)
    }
}
