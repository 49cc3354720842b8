//! Worker Registry
//!
//! Signup, profile and status changes, and the lookups the other
//! components use to pick colleagues.

use crate::auth::{Actor, load_actor, load_worker, require_admin};
use crate::db::repository::{RepoError, worker};
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    DEFAULT_DEPARTMENT, DEFAULT_PAYMENT_METHOD, NewWorker, Worker, WorkerProfileUpdate,
    WorkerStatus,
};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct WorkerRegistry {
    pool: SqlitePool,
}

impl WorkerRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an `Active` worker. A taken email is a `PersistenceConflict`.
    pub async fn register(&self, data: NewWorker) -> AppResult<Worker> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_email(&data.email)?;
        validate_required_text(&data.password, "password", MAX_PASSWORD_LEN)?;
        validate_optional_text(data.contact.as_deref(), "contact", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(data.address.as_deref(), "address", MAX_ADDRESS_LEN)?;

        let department = non_blank(data.department.as_deref()).unwrap_or(DEFAULT_DEPARTMENT);
        validate_required_text(department, "department", MAX_NAME_LEN)?;
        let payment_method =
            non_blank(data.payment_method.as_deref()).unwrap_or(DEFAULT_PAYMENT_METHOD);
        validate_required_text(payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;

        let email = data.email.trim().to_lowercase();
        let insert = worker::WorkerInsert {
            name: data.name.trim(),
            email: &email,
            password: &data.password,
            contact: data.contact.as_deref(),
            address: data.address.as_deref(),
            department,
            role: data.role.unwrap_or_default(),
            payment_method,
            joining_date: data.joining_date,
        };

        match worker::create(&self.pool, insert).await {
            Ok(created) => {
                tracing::info!(
                    worker_id = created.id,
                    department = %created.department,
                    role = created.role.as_str(),
                    "Worker registered"
                );
                Ok(created)
            }
            Err(RepoError::Duplicate(_)) => Err(AppError::new(ErrorCode::EmailAlreadyExists)
                .with_detail("email", email)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get(&self, worker_id: i64) -> AppResult<Worker> {
        load_worker(&self.pool, worker_id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Worker>> {
        Ok(worker::find_by_email(&self.pool, &email.trim().to_lowercase()).await?)
    }

    /// Contact/address of the actor's own row; `None` fields are kept
    pub async fn update_profile(
        &self,
        actor: &Actor,
        data: WorkerProfileUpdate,
    ) -> AppResult<Worker> {
        let current = load_actor(&self.pool, actor).await?;
        validate_optional_text(data.contact.as_deref(), "contact", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(data.address.as_deref(), "address", MAX_ADDRESS_LEN)?;

        let updated = worker::update_profile(&self.pool, current.id, &data).await?;
        tracing::info!(worker_id = updated.id, "Worker profile updated");
        Ok(updated)
    }

    /// Change the actor's own password.
    ///
    /// `current` must match the stored value exactly and `new` must equal
    /// `confirm`.
    pub async fn change_password(
        &self,
        actor: &Actor,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> AppResult<()> {
        let worker = load_actor(&self.pool, actor).await?;
        if worker.password != current {
            security_log!("WARN", "password_change_denied", worker_id = worker.id);
            return Err(AppError::new(ErrorCode::InvalidPassword));
        }
        validate_required_text(new, "password", MAX_PASSWORD_LEN)?;
        if new != confirm {
            return Err(AppError::new(ErrorCode::PasswordMismatch));
        }

        if !worker::update_password(&self.pool, worker.id, new).await? {
            return Err(AppError::with_message(
                ErrorCode::WorkerNotFound,
                format!("Worker {} not found", worker.id),
            ));
        }
        tracing::info!(worker_id = worker.id, "Password changed");
        Ok(())
    }

    /// Admin only
    pub async fn update_status(
        &self,
        actor: &Actor,
        worker_id: i64,
        status: WorkerStatus,
    ) -> AppResult<Worker> {
        let admin = require_admin(&self.pool, actor).await?;
        let target = load_worker(&self.pool, worker_id).await?;

        let updated = worker::update_status(&self.pool, target.id, status).await?;
        tracing::info!(
            worker_id,
            admin_id = admin.id,
            from = ?target.status,
            to = ?updated.status,
            "Worker status changed"
        );
        Ok(updated)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Worker>> {
        Ok(worker::find_all(&self.pool).await?)
    }

    pub async fn list_by_department(&self, department: &str) -> AppResult<Vec<Worker>> {
        Ok(worker::find_by_department(&self.pool, department).await?)
    }

    /// Colleagues `requester_id` may nominate: active `worker`-role staff of
    /// the same department, by name
    pub async fn available_substitutes(&self, requester_id: i64) -> AppResult<Vec<Worker>> {
        let requester = load_worker(&self.pool, requester_id).await?;
        Ok(worker::find_available_substitutes(&self.pool, &requester.department, requester.id).await?)
    }

    pub async fn count(&self) -> AppResult<i64> {
        Ok(worker::count(&self.pool).await?)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, date, seed_worker};
    use shared::error::ErrorKind;
    use shared::models::WorkerRole;

    fn new_worker(name: &str, email: &str) -> NewWorker {
        NewWorker {
            name: name.into(),
            email: email.into(),
            password: "hunter2".into(),
            contact: Some("555-0100".into()),
            address: None,
            department: None,
            role: None,
            payment_method: None,
            joining_date: date("2024-03-01"),
        }
    }

    #[tokio::test]
    async fn test_register_applies_defaults() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let w = reg.register(new_worker("Nia", "Nia@Example.com")).await.unwrap();
        assert_eq!(w.email, "nia@example.com");
        assert_eq!(w.department, DEFAULT_DEPARTMENT);
        assert_eq!(w.payment_method, DEFAULT_PAYMENT_METHOD);
        assert_eq!(w.role, WorkerRole::Worker);
        assert_eq!(w.status, WorkerStatus::Active);
        assert_eq!(w.joining_date, date("2024-03-01"));
        assert_eq!(reg.get(w.id).await.unwrap().password, "hunter2");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        reg.register(new_worker("Nia", "nia@example.com")).await.unwrap();
        let err = reg
            .register(new_worker("Other", "NIA@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailAlreadyExists);
        assert_eq!(err.kind(), ErrorKind::PersistenceConflict);
        assert_eq!(reg.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let err = reg.register(new_worker("", "a@example.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        let err = reg.register(new_worker("A", "not-an-email")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        let mut blank_pw = new_worker("A", "a@example.com");
        blank_pw.password = String::new();
        assert!(reg.register(blank_pw).await.is_err());
    }

    #[tokio::test]
    async fn test_update_profile_own_row_only() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let w = seed_worker(&db.pool, "Tom", "Ops", WorkerRole::Worker).await;

        let updated = reg
            .update_profile(
                &Actor::from(&w),
                WorkerProfileUpdate {
                    contact: None,
                    address: Some("1 Main St".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.contact, None);
        assert_eq!(updated.department, "Ops");
    }

    #[tokio::test]
    async fn test_change_password() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let w = seed_worker(&db.pool, "Tom", "Ops", WorkerRole::Worker).await;
        let actor = Actor::from(&w);

        reg.change_password(&actor, "pw", "s3cret", "s3cret")
            .await
            .unwrap();
        assert_eq!(reg.get(w.id).await.unwrap().password, "s3cret");
    }

    #[tokio::test]
    async fn test_change_password_rejections_keep_old_value() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let w = seed_worker(&db.pool, "Tom", "Ops", WorkerRole::Worker).await;
        let actor = Actor::from(&w);

        let err = reg
            .change_password(&actor, "wrong", "next", "next")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPassword);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = reg.change_password(&actor, "pw", "  ", "  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = reg
            .change_password(&actor, "pw", "next", "nxet")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordMismatch);
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = reg
            .change_password(&Actor::worker(999), "pw", "next", "next")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert_eq!(reg.get(w.id).await.unwrap().password, "pw");
    }

    #[tokio::test]
    async fn test_update_status_admin_only() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let manager = seed_worker(&db.pool, "Max", "Ops", WorkerRole::Manager).await;
        let w = seed_worker(&db.pool, "Tom", "Ops", WorkerRole::Worker).await;

        let err = reg
            .update_status(&Actor::from(&manager), w.id, WorkerStatus::Inactive)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let updated = reg
            .update_status(&Actor::from(&admin), w.id, WorkerStatus::OnLeave)
            .await
            .unwrap();
        assert_eq!(updated.status, WorkerStatus::OnLeave);

        let err = reg
            .update_status(&Actor::from(&admin), 999, WorkerStatus::Active)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_available_substitutes() {
        let db = TestDb::new().await;
        let reg = WorkerRegistry::new(db.pool.clone());
        let me = seed_worker(&db.pool, "Me", "Ops", WorkerRole::Worker).await;
        let zed = seed_worker(&db.pool, "Zed", "Ops", WorkerRole::Worker).await;
        let amy = seed_worker(&db.pool, "Amy", "Ops", WorkerRole::Worker).await;
        let away = seed_worker(&db.pool, "Away", "Ops", WorkerRole::Worker).await;
        seed_worker(&db.pool, "Boss", "Ops", WorkerRole::Manager).await;
        seed_worker(&db.pool, "Far", "Sales", WorkerRole::Worker).await;
        worker::update_status(&db.pool, away.id, WorkerStatus::Inactive)
            .await
            .unwrap();

        let names: Vec<_> = reg
            .available_substitutes(me.id)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(names, vec![amy.id, zed.id]);

        assert_eq!(reg.list_by_department("Ops").await.unwrap().len(), 5);
        assert_eq!(reg.list_all().await.unwrap().len(), 6);
    }
}
