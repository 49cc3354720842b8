//! Payroll
//!
//! One salary record per (worker, month). Amounts are computed in
//! `Decimal` and stored as `f64` rounded to cents.

use crate::auth::{Actor, load_worker, require_admin};
use crate::db::repository::{RepoError, salary};
use crate::utils::validation::validate_non_negative;
use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Salary, SalaryListing, SalaryStatus, Worker};
use shared::types::YearMonth;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PayrollService {
    pool: SqlitePool,
    bonus_rate: f64,
}

/// Bonus and total for the given base pay and overtime
fn compute_amounts(base_salary: f64, extra_hours: f64, bonus_rate: f64) -> (f64, f64) {
    let to_dec = |v: f64| Decimal::from_f64(v).unwrap_or_default();
    let round = |d: Decimal| {
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    };

    let bonus = to_dec(extra_hours) * to_dec(bonus_rate);
    let total = to_dec(base_salary) + bonus;
    (round(bonus), round(total))
}

impl PayrollService {
    pub fn new(pool: SqlitePool, bonus_rate: f64) -> Self {
        Self { pool, bonus_rate }
    }

    /// Create a `Draft` salary for `worker_id` in `month`
    pub async fn create(
        &self,
        actor: &Actor,
        worker_id: i64,
        month: YearMonth,
        base_salary: f64,
        extra_hours: f64,
    ) -> AppResult<Salary> {
        let admin = require_admin(&self.pool, actor).await?;
        validate_non_negative(base_salary, "base_salary")?;
        validate_non_negative(extra_hours, "extra_hours")?;
        let worker = load_worker(&self.pool, worker_id).await?;

        let (bonus_amount, total_salary) = compute_amounts(base_salary, extra_hours, self.bonus_rate);
        let month_key = month.to_string();
        let created = salary::create(
            &self.pool,
            salary::SalaryInsert {
                worker_id: worker.id,
                month: &month_key,
                base_salary,
                extra_hours,
                bonus_amount,
                total_salary,
            },
        )
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => AppError::new(ErrorCode::SalaryAlreadyExists)
                .with_detail("worker_id", worker.id)
                .with_detail("month", month_key.as_str()),
            other => other.into(),
        })?;

        tracing::info!(
            salary_id = created.id,
            worker_id = worker.id,
            admin_id = admin.id,
            %month,
            total = created.total_salary,
            "Salary created"
        );
        Ok(created)
    }

    /// Move a salary to any of `Draft`, `Finalized`, `Paid`
    pub async fn update_status(
        &self,
        actor: &Actor,
        salary_id: i64,
        status: SalaryStatus,
    ) -> AppResult<Salary> {
        let admin = require_admin(&self.pool, actor).await?;
        let updated = salary::update_status(&self.pool, salary_id, status)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(msg) => AppError::with_message(ErrorCode::SalaryNotFound, msg),
                other => other.into(),
            })?;
        tracing::info!(salary_id, admin_id = admin.id, to = ?status, "Salary status changed");
        Ok(updated)
    }

    pub async fn list_for_month(&self, month: YearMonth) -> AppResult<Vec<SalaryListing>> {
        Ok(salary::find_by_month(&self.pool, &month.to_string()).await?)
    }

    pub async fn latest_for_worker(&self, worker_id: i64) -> AppResult<Option<Salary>> {
        Ok(salary::find_latest_for_worker(&self.pool, worker_id).await?)
    }

    pub async fn list_for_worker(&self, worker_id: i64) -> AppResult<Vec<Salary>> {
        Ok(salary::find_by_worker(&self.pool, worker_id).await?)
    }

    /// Workers with no salary record yet for `month`
    pub async fn workers_without_salary(&self, month: YearMonth) -> AppResult<Vec<Worker>> {
        Ok(salary::find_workers_without_salary(&self.pool, &month.to_string()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, seed_worker};
    use shared::error::ErrorKind;
    use shared::models::WorkerRole;

    fn june() -> YearMonth {
        "2024-06".parse().unwrap()
    }

    #[test]
    fn test_compute_amounts() {
        assert_eq!(compute_amounts(1000.0, 4.0, 50.0), (200.0, 1200.0));
        assert_eq!(compute_amounts(1000.0, 0.5, 12.25), (6.13, 1006.13));
        assert_eq!(compute_amounts(0.0, 0.0, 50.0), (0.0, 0.0));
    }

    #[tokio::test]
    async fn test_create_and_pay() {
        let db = TestDb::new().await;
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let w = seed_worker(&db.pool, "Wu", "Ops", WorkerRole::Worker).await;
        let svc = PayrollService::new(db.pool.clone(), 50.0);
        let actor = Actor::from(&admin);

        let s = svc.create(&actor, w.id, june(), 2000.0, 3.0).await.unwrap();
        assert_eq!(s.status, SalaryStatus::Draft);
        assert_eq!(s.bonus_amount, 150.0);
        assert_eq!(s.total_salary, 2150.0);
        assert_eq!(s.month, "2024-06");

        let paid = svc.update_status(&actor, s.id, SalaryStatus::Paid).await.unwrap();
        assert_eq!(paid.status, SalaryStatus::Paid);

        let listing = svc.list_for_month(june()).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].worker_name, "Wu");
        assert_eq!(svc.latest_for_worker(w.id).await.unwrap().unwrap().id, s.id);

        let missing = svc.workers_without_salary(june()).await.unwrap();
        assert!(missing.iter().all(|m| m.id != w.id));
    }

    #[tokio::test]
    async fn test_duplicate_month_conflicts() {
        let db = TestDb::new().await;
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let w = seed_worker(&db.pool, "Wu", "Ops", WorkerRole::Worker).await;
        let svc = PayrollService::new(db.pool.clone(), 50.0);
        let actor = Actor::from(&admin);

        svc.create(&actor, w.id, june(), 2000.0, 0.0).await.unwrap();
        let err = svc.create(&actor, w.id, june(), 2500.0, 0.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SalaryAlreadyExists);
        assert_eq!(err.kind(), ErrorKind::PersistenceConflict);
        assert_eq!(svc.list_for_worker(w.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_only_and_missing() {
        let db = TestDb::new().await;
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let manager = seed_worker(&db.pool, "Mo", "Ops", WorkerRole::Manager).await;
        let svc = PayrollService::new(db.pool.clone(), 50.0);

        let err = svc
            .create(&Actor::from(&manager), manager.id, june(), 100.0, 0.0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = svc
            .create(&Actor::from(&admin), manager.id, june(), -1.0, 0.0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = svc
            .update_status(&Actor::from(&admin), 404, SalaryStatus::Finalized)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SalaryNotFound);
    }
}
