//! Per-call authorization checks
//!
//! Nothing here is cached: the actor and the target are read fresh on
//! every call, so a department or role change takes effect immediately.

use super::Actor;
use crate::db::repository::worker;
use crate::security_log;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Worker, WorkerRole};
use sqlx::SqlitePool;

/// Load a worker or fail with `WorkerNotFound`
pub async fn load_worker(pool: &SqlitePool, worker_id: i64) -> AppResult<Worker> {
    worker::find_by_id(pool, worker_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::WorkerNotFound,
            format!("Worker {worker_id} not found"),
        )
        .with_detail("worker_id", worker_id)
    })
}

/// Re-load the actor's row and check the claimed role still holds
pub async fn load_actor(pool: &SqlitePool, actor: &Actor) -> AppResult<Worker> {
    let current = load_worker(pool, actor.worker_id).await?;
    if current.role != actor.role {
        security_log!(
            "WARN",
            "stale_role",
            worker_id = actor.worker_id,
            claimed = actor.role.as_str(),
            stored = current.role.as_str()
        );
        return Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            "Role has changed, please sign in again",
        ));
    }
    Ok(current)
}

/// Actor must currently be an admin
pub async fn require_admin(pool: &SqlitePool, actor: &Actor) -> AppResult<Worker> {
    let current = load_actor(pool, actor).await?;
    if !current.is_admin() {
        security_log!("WARN", "admin_required", worker_id = actor.worker_id);
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    Ok(current)
}

/// Actor must currently be a manager of `target`'s department
pub async fn require_manager_of(
    pool: &SqlitePool,
    actor: &Actor,
    target: &Worker,
) -> AppResult<Worker> {
    let current = load_actor(pool, actor).await?;
    if current.role != WorkerRole::Manager {
        security_log!("WARN", "manager_required", worker_id = actor.worker_id);
        return Err(AppError::with_message(
            ErrorCode::RoleRequired,
            "Manager role required",
        ));
    }
    ensure_same_department(&current, target)?;
    Ok(current)
}

/// Target may be touched by itself or by a manager of its department
pub async fn require_self_or_manager_of(
    pool: &SqlitePool,
    actor: &Actor,
    target: &Worker,
) -> AppResult<Worker> {
    if actor.worker_id == target.id {
        return load_actor(pool, actor).await;
    }
    require_manager_of(pool, actor, target).await
}

fn ensure_same_department(manager: &Worker, target: &Worker) -> AppResult<()> {
    if manager.department != target.department {
        security_log!(
            "WARN",
            "department_mismatch",
            worker_id = manager.id,
            department = manager.department.as_str(),
            target_id = target.id,
            target_department = target.department.as_str()
        );
        return Err(AppError::new(ErrorCode::DepartmentMismatch)
            .with_detail("department", manager.department.as_str())
            .with_detail("target_department", target.department.as_str()));
    }
    Ok(())
}
