//! Feedback / Performance
//!
//! Monthly performance rows carry a manager's feedback plus attendance
//! figures frozen when the row is first created.

use crate::auth::{Actor, load_worker, require_manager_of};
use crate::db::repository::{attendance, performance};
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use shared::error::AppResult;
use shared::models::Performance;
use shared::types::YearMonth;
use shared::util::{round2, to_percentage};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct FeedbackService {
    pool: SqlitePool,
}

impl FeedbackService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record feedback for `worker_id` in `month`.
    ///
    /// Department-scoped manager action. An existing row keeps its figures
    /// and only gets the new feedback; a new row takes attendance % as the
    /// mean attendance value ×100 and total hours as the month's sum.
    pub async fn submit_feedback(
        &self,
        actor: &Actor,
        worker_id: i64,
        month: YearMonth,
        feedback: &str,
    ) -> AppResult<Performance> {
        validate_required_text(feedback, "feedback", MAX_NOTE_LEN)?;
        let target = load_worker(&self.pool, worker_id).await?;
        let manager = require_manager_of(&self.pool, actor, &target).await?;

        let (mean_value, total_hours) = attendance::month_totals(
            &self.pool,
            target.id,
            month.first_day(),
            month.next_first_day(),
        )
        .await?;
        let attendance_percentage = to_percentage(mean_value.unwrap_or(0.0));

        let record = performance::upsert_feedback(
            &self.pool,
            target.id,
            &month.to_string(),
            attendance_percentage,
            round2(total_hours),
            feedback.trim(),
        )
        .await?;

        tracing::info!(
            worker_id = target.id,
            manager_id = manager.id,
            %month,
            "Feedback recorded"
        );
        Ok(record)
    }

    /// Newest month first
    pub async fn list_for_worker(&self, worker_id: i64) -> AppResult<Vec<Performance>> {
        Ok(performance::find_by_worker(&self.pool, worker_id).await?)
    }

    pub async fn for_month(&self, worker_id: i64, month: YearMonth) -> AppResult<Option<Performance>> {
        Ok(performance::find_for_month(&self.pool, worker_id, &month.to_string()).await?)
    }
}
