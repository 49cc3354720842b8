use crate::auth::{Actor, load_actor, load_worker, require_admin};
use crate::core::WorkflowPolicy;
use crate::db::repository::substitute;
use crate::security_log;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SUBSTITUTE_HOURS, validate_optional_text, validate_positive,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{NewSubstituteRequest, SubstituteRequest, SubstituteStatus};
use sqlx::SqlitePool;

/// Drives substitute requests from submission to a terminal state
#[derive(Clone)]
pub struct SubstituteWorkflow {
    pool: SqlitePool,
    policy: WorkflowPolicy,
}

impl SubstituteWorkflow {
    pub fn new(pool: SqlitePool, policy: WorkflowPolicy) -> Self {
        Self { pool, policy }
    }

    /// Raise a request for `data.substitute_id` to cover the actor.
    ///
    /// The substitute must exist and be active. Naming oneself is refused
    /// unless the policy allows it.
    pub async fn submit(
        &self,
        actor: &Actor,
        data: NewSubstituteRequest,
    ) -> AppResult<SubstituteRequest> {
        let requester = load_actor(&self.pool, actor).await?;
        validate_positive(data.hours, "hours", MAX_SUBSTITUTE_HOURS)?;
        validate_optional_text(Some(data.reason.as_str()), "reason", MAX_NOTE_LEN)?;

        if data.substitute_id == requester.id && !self.policy.permits_self_substitution() {
            tracing::warn!(worker_id = requester.id, "Rejected self-substitution");
            return Err(AppError::new(ErrorCode::SelfSubstitution));
        }

        let substitute = load_worker(&self.pool, data.substitute_id).await?;
        if !substitute.is_active() {
            return Err(AppError::with_message(
                ErrorCode::WorkerNotActive,
                format!("Worker {} is not active", substitute.id),
            )
            .with_detail("worker_id", substitute.id));
        }

        let request = substitute::create(
            &self.pool,
            requester.id,
            substitute.id,
            data.date,
            data.hours,
            data.reason.trim(),
        )
        .await?;

        tracing::info!(
            request_id = request.id,
            requester_id = requester.id,
            substitute_id = substitute.id,
            date = %request.date,
            hours = request.hours,
            "Substitute request submitted"
        );
        Ok(request)
    }

    /// `Pending` → `Accepted`, by the designated substitute only.
    ///
    /// Anyone else gets `Unauthorized` (legacy: the request comes back
    /// unchanged). A request that is no longer pending is an
    /// `InvalidTransition` in both modes.
    pub async fn accept(&self, request_id: i64, actor: &Actor) -> AppResult<SubstituteRequest> {
        let acting = load_actor(&self.pool, actor).await?;
        let request = self.load(request_id).await?;

        if request.substitute_id != acting.id {
            security_log!(
                "WARN",
                "substitute_accept_denied",
                request_id = request_id,
                worker_id = acting.id,
                substitute_id = request.substitute_id
            );
            if self.policy.legacy_compat {
                return Ok(request);
            }
            return Err(AppError::new(ErrorCode::NotDesignatedSubstitute)
                .with_detail("request_id", request_id));
        }

        if request.status != SubstituteStatus::Pending {
            return Err(invalid_transition(&request, "accept"));
        }

        let rows = substitute::mark_accepted(&self.pool, request_id, acting.id).await?;
        let current = self.load(request_id).await?;
        if rows == 0 {
            // Moved on between read and write (typically an admin reject)
            return Err(invalid_transition(&current, "accept"));
        }

        tracing::info!(request_id, substitute_id = acting.id, "Substitute request accepted");
        Ok(current)
    }

    /// `Accepted` → `Accepted{approved}`, admin only.
    ///
    /// Approving an approved request is a no-op success. Any other state is
    /// an `InvalidTransition` (legacy: returned unchanged).
    pub async fn admin_approve(
        &self,
        request_id: i64,
        actor: &Actor,
    ) -> AppResult<SubstituteRequest> {
        let admin = require_admin(&self.pool, actor).await?;
        let request = self.load(request_id).await?;

        if request.status == SubstituteStatus::Accepted && request.admin_approved {
            return Ok(request);
        }
        if request.status != SubstituteStatus::Accepted {
            tracing::warn!(request_id, state = %request.state_label(), "Approve on unaccepted request");
            if self.policy.legacy_compat {
                return Ok(request);
            }
            return Err(invalid_transition(&request, "approve"));
        }

        let rows = substitute::mark_approved(&self.pool, request_id).await?;
        let current = self.load(request_id).await?;
        if rows == 0 {
            if current.status == SubstituteStatus::Accepted && current.admin_approved {
                return Ok(current);
            }
            if self.policy.legacy_compat {
                return Ok(current);
            }
            return Err(invalid_transition(&current, "approve"));
        }

        tracing::info!(request_id, admin_id = admin.id, "Substitute request approved");
        Ok(current)
    }

    /// Any state → `Rejected`, admin only.
    ///
    /// Rejecting a rejected request is a no-op success. An approved
    /// request is final (legacy: it is rejected and the approval cleared).
    pub async fn admin_reject(
        &self,
        request_id: i64,
        actor: &Actor,
    ) -> AppResult<SubstituteRequest> {
        let admin = require_admin(&self.pool, actor).await?;
        let request = self.load(request_id).await?;

        if request.status == SubstituteStatus::Rejected {
            return Ok(request);
        }
        let include_approved = self.policy.legacy_compat;
        if request.admin_approved && !include_approved {
            tracing::warn!(request_id, "Reject on approved request");
            return Err(invalid_transition(&request, "reject"));
        }

        let rows = substitute::mark_rejected(&self.pool, request_id, include_approved).await?;
        let current = self.load(request_id).await?;
        if rows == 0 {
            if current.status == SubstituteStatus::Rejected {
                return Ok(current);
            }
            // Approved in between
            return Err(invalid_transition(&current, "reject"));
        }

        if request.admin_approved {
            tracing::warn!(request_id, admin_id = admin.id, "Approved substitute request rejected (legacy mode)");
        } else {
            tracing::info!(request_id, admin_id = admin.id, from = %request.status, "Substitute request rejected");
        }
        Ok(current)
    }

    pub async fn get(&self, request_id: i64) -> AppResult<SubstituteRequest> {
        self.load(request_id).await
    }

    /// Requests raised by `worker_id`, newest first
    pub async fn list_requested_by(&self, worker_id: i64) -> AppResult<Vec<SubstituteRequest>> {
        Ok(substitute::find_by_requester(&self.pool, worker_id).await?)
    }

    /// Requests naming `worker_id` as the substitute, newest first
    pub async fn list_covering(&self, worker_id: i64) -> AppResult<Vec<SubstituteRequest>> {
        Ok(substitute::find_by_substitute(&self.pool, worker_id).await?)
    }

    /// Accepted, unapproved requests waiting on an admin
    pub async fn list_awaiting_approval(&self) -> AppResult<Vec<SubstituteRequest>> {
        Ok(substitute::find_awaiting_approval(&self.pool).await?)
    }

    pub async fn count_awaiting_approval(&self) -> AppResult<i64> {
        Ok(substitute::count_awaiting_approval(&self.pool).await?)
    }

    async fn load(&self, request_id: i64) -> AppResult<SubstituteRequest> {
        substitute::find_by_id(&self.pool, request_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::SubstituteRequestNotFound,
                    format!("Substitute request {request_id} not found"),
                )
            })
    }
}

fn invalid_transition(request: &SubstituteRequest, action: &str) -> AppError {
    AppError::invalid_transition(
        format!("Cannot {action} a request in state {}", request.state_label()),
        request.state_label(),
    )
    .with_detail("request_id", request.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, date, legacy, seed_worker, strict};
    use shared::error::ErrorKind;
    use shared::models::{Worker, WorkerRole, WorkerStatus};

    struct Fixture {
        _db: TestDb,
        flow: SubstituteWorkflow,
        requester: Worker,
        substitute: Worker,
        bystander: Worker,
        admin: Worker,
    }

    async fn fixture(policy: WorkflowPolicy) -> Fixture {
        let db = TestDb::new().await;
        let requester = seed_worker(&db.pool, "Rita", "Ops", WorkerRole::Worker).await;
        let substitute = seed_worker(&db.pool, "Sam", "Ops", WorkerRole::Worker).await;
        let bystander = seed_worker(&db.pool, "Bea", "Ops", WorkerRole::Worker).await;
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let flow = SubstituteWorkflow::new(db.pool.clone(), policy);
        Fixture { _db: db, flow, requester, substitute, bystander, admin }
    }

    impl Fixture {
        async fn submit(&self) -> SubstituteRequest {
            self.flow
                .submit(
                    &Actor::from(&self.requester),
                    NewSubstituteRequest {
                        substitute_id: self.substitute.id,
                        date: date("2024-06-03"),
                        hours: 4.0,
                        reason: "Medical appointment".into(),
                    },
                )
                .await
                .unwrap()
        }

        async fn accepted(&self) -> SubstituteRequest {
            let req = self.submit().await;
            self.flow.accept(req.id, &Actor::from(&self.substitute)).await.unwrap()
        }

        fn admin(&self) -> Actor {
            Actor::from(&self.admin)
        }
    }

    #[tokio::test]
    async fn test_submit_starts_pending_unapproved() {
        let f = fixture(strict()).await;
        let req = f.submit().await;
        assert_eq!(req.status, SubstituteStatus::Pending);
        assert!(!req.admin_approved);
        assert_eq!(req.requester_id, f.requester.id);
        assert_eq!(req.substitute_id, f.substitute.id);
    }

    #[tokio::test]
    async fn test_submit_validates_input() {
        let f = fixture(strict()).await;
        let actor = Actor::from(&f.requester);
        let base = NewSubstituteRequest {
            substitute_id: f.substitute.id,
            date: date("2024-06-03"),
            hours: 0.0,
            reason: "x".into(),
        };
        let err = f.flow.submit(&actor, base.clone()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = f
            .flow
            .submit(&actor, NewSubstituteRequest { hours: 25.0, ..base.clone() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);

        let err = f
            .flow
            .submit(&actor, NewSubstituteRequest { hours: 2.0, substitute_id: 999, ..base })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_submit_reason_is_optional() {
        let f = fixture(strict()).await;
        let req = f
            .flow
            .submit(
                &Actor::from(&f.requester),
                NewSubstituteRequest {
                    substitute_id: f.substitute.id,
                    date: date("2024-06-03"),
                    hours: 4.0,
                    reason: String::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(req.status, SubstituteStatus::Pending);
        assert_eq!(req.reason, "");

        let padded = f
            .flow
            .submit(
                &Actor::from(&f.requester),
                NewSubstituteRequest {
                    substitute_id: f.substitute.id,
                    date: date("2024-06-04"),
                    hours: 2.0,
                    reason: "  Dentist ".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(padded.reason, "Dentist");
    }

    #[tokio::test]
    async fn test_submit_requires_active_substitute() {
        let f = fixture(strict()).await;
        crate::db::repository::worker::update_status(&f._db.pool, f.substitute.id, WorkerStatus::OnLeave)
            .await
            .unwrap();
        let err = f
            .flow
            .submit(
                &Actor::from(&f.requester),
                NewSubstituteRequest {
                    substitute_id: f.substitute.id,
                    date: date("2024-06-03"),
                    hours: 4.0,
                    reason: "Family".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::WorkerNotActive);
    }

    #[tokio::test]
    async fn test_self_substitution_by_policy() {
        let self_request = |f: &Fixture| NewSubstituteRequest {
            substitute_id: f.requester.id,
            date: date("2024-06-03"),
            hours: 4.0,
            reason: "Swap".into(),
        };

        let f = fixture(strict()).await;
        let err = f
            .flow
            .submit(&Actor::from(&f.requester), self_request(&f))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SelfSubstitution);

        let f = fixture(WorkflowPolicy { allow_self_substitution: true, ..strict() }).await;
        assert!(f.flow.submit(&Actor::from(&f.requester), self_request(&f)).await.is_ok());

        let f = fixture(legacy()).await;
        assert!(f.flow.submit(&Actor::from(&f.requester), self_request(&f)).await.is_ok());
    }

    #[tokio::test]
    async fn test_accept_by_designated_substitute() {
        let f = fixture(strict()).await;
        let req = f.accepted().await;
        assert_eq!(req.status, SubstituteStatus::Accepted);
        assert!(!req.admin_approved);
    }

    #[tokio::test]
    async fn test_accept_by_other_worker_is_unauthorized() {
        let f = fixture(strict()).await;
        let req = f.submit().await;

        let err = f.flow.accept(req.id, &Actor::from(&f.bystander)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        // the requester cannot accept their own request either
        let err = f.flow.accept(req.id, &Actor::from(&f.requester)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        assert_eq!(f.flow.get(req.id).await.unwrap(), req);
    }

    #[tokio::test]
    async fn test_legacy_accept_by_other_worker_is_silent_noop() {
        let f = fixture(legacy()).await;
        let req = f.submit().await;
        let returned = f.flow.accept(req.id, &Actor::from(&f.bystander)).await.unwrap();
        assert_eq!(returned, req);
        assert_eq!(f.flow.get(req.id).await.unwrap().status, SubstituteStatus::Pending);
    }

    #[tokio::test]
    async fn test_accept_twice_is_invalid_transition() {
        for policy in [strict(), legacy()] {
            let f = fixture(policy).await;
            let req = f.accepted().await;
            let err = f.flow.accept(req.id, &Actor::from(&f.substitute)).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        }
    }

    #[tokio::test]
    async fn test_accept_unknown_request() {
        let f = fixture(strict()).await;
        let err = f.flow.accept(404, &Actor::from(&f.substitute)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubstituteRequestNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_approve_is_idempotent() {
        let f = fixture(strict()).await;
        let req = f.accepted().await;

        let first = f.flow.admin_approve(req.id, &f.admin()).await.unwrap();
        assert_eq!(first.status, SubstituteStatus::Accepted);
        assert!(first.admin_approved);
        assert!(first.is_terminal());

        let second = f.flow.admin_approve(req.id, &f.admin()).await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_approve_pending_is_invalid_transition() {
        let f = fixture(strict()).await;
        let req = f.submit().await;
        let err = f.flow.admin_approve(req.id, &f.admin()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(err.details.unwrap().get("from").unwrap(), "Pending");
        assert!(!f.flow.get(req.id).await.unwrap().admin_approved);
    }

    #[tokio::test]
    async fn test_legacy_approve_pending_is_noop() {
        let f = fixture(legacy()).await;
        let req = f.submit().await;
        let returned = f.flow.admin_approve(req.id, &f.admin()).await.unwrap();
        assert_eq!(returned, req);
        assert!(!returned.admin_approved);
    }

    #[tokio::test]
    async fn test_approve_requires_admin() {
        let f = fixture(strict()).await;
        let req = f.accepted().await;
        let err = f
            .flow
            .admin_approve(req.id, &Actor::from(&f.requester))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(!f.flow.get(req.id).await.unwrap().admin_approved);
    }

    #[tokio::test]
    async fn test_reject_from_pending_and_accepted() {
        let f = fixture(strict()).await;
        let pending = f.submit().await;
        let rejected = f.flow.admin_reject(pending.id, &f.admin()).await.unwrap();
        assert_eq!(rejected.status, SubstituteStatus::Rejected);
        assert!(!rejected.admin_approved);

        let accepted = f.accepted().await;
        let rejected = f.flow.admin_reject(accepted.id, &f.admin()).await.unwrap();
        assert_eq!(rejected.status, SubstituteStatus::Rejected);
    }

    #[tokio::test]
    async fn test_reject_is_idempotent() {
        let f = fixture(strict()).await;
        let req = f.submit().await;
        let first = f.flow.admin_reject(req.id, &f.admin()).await.unwrap();
        let second = f.flow.admin_reject(req.id, &f.admin()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_no_approval_or_accept_after_reject() {
        for policy in [strict(), legacy()] {
            let f = fixture(policy).await;
            let req = f.submit().await;
            f.flow.admin_reject(req.id, &f.admin()).await.unwrap();

            let approve = f.flow.admin_approve(req.id, &f.admin()).await;
            let accept = f.flow.accept(req.id, &Actor::from(&f.substitute)).await;
            if policy.legacy_compat {
                assert!(approve.is_ok());
            } else {
                assert_eq!(approve.unwrap_err().kind(), ErrorKind::InvalidTransition);
            }
            assert_eq!(accept.unwrap_err().kind(), ErrorKind::InvalidTransition);

            let current = f.flow.get(req.id).await.unwrap();
            assert_eq!(current.status, SubstituteStatus::Rejected);
            assert!(!current.admin_approved);
        }
    }

    #[tokio::test]
    async fn test_reject_approved_is_invalid_transition() {
        let f = fixture(strict()).await;
        let req = f.accepted().await;
        f.flow.admin_approve(req.id, &f.admin()).await.unwrap();

        let err = f.flow.admin_reject(req.id, &f.admin()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        let current = f.flow.get(req.id).await.unwrap();
        assert_eq!(current.status, SubstituteStatus::Accepted);
        assert!(current.admin_approved);
    }

    #[tokio::test]
    async fn test_legacy_reject_approved_clears_flag() {
        let f = fixture(legacy()).await;
        let req = f.accepted().await;
        f.flow.admin_approve(req.id, &f.admin()).await.unwrap();

        let current = f.flow.admin_reject(req.id, &f.admin()).await.unwrap();
        assert_eq!(current.status, SubstituteStatus::Rejected);
        assert!(!current.admin_approved);
    }

    #[tokio::test]
    async fn test_concurrent_accept_and_reject_settle_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("race.db");
        let db = crate::db::DbService::new(path.to_str().unwrap(), 4)
            .await
            .unwrap();
        let requester = seed_worker(&db.pool, "Rita", "Ops", WorkerRole::Worker).await;
        let substitute = seed_worker(&db.pool, "Sam", "Ops", WorkerRole::Worker).await;
        let admin = seed_worker(&db.pool, "Ada", "Office", WorkerRole::Admin).await;
        let flow = SubstituteWorkflow::new(db.pool.clone(), strict());

        for day in 1..=5 {
            let req = flow
                .submit(
                    &Actor::from(&requester),
                    NewSubstituteRequest {
                        substitute_id: substitute.id,
                        date: date(&format!("2024-06-0{day}")),
                        hours: 4.0,
                        reason: String::new(),
                    },
                )
                .await
                .unwrap();

            let substitute_actor = Actor::from(&substitute);
            let admin_actor = Actor::from(&admin);
            let (accepted, rejected) = tokio::join!(
                flow.accept(req.id, &substitute_actor),
                flow.admin_reject(req.id, &admin_actor)
            );
            for err in [accepted.err(), rejected.err()].into_iter().flatten() {
                assert_eq!(err.kind(), ErrorKind::InvalidTransition);
            }

            let current = flow.get(req.id).await.unwrap();
            assert!(matches!(
                current.status,
                SubstituteStatus::Rejected | SubstituteStatus::Accepted
            ));
            assert!(!current.admin_approved);
        }
    }

    #[tokio::test]
    async fn test_approval_flag_cannot_be_forced_onto_unaccepted_row() {
        let f = fixture(strict()).await;
        let req = f.submit().await;
        let err = sqlx::query("UPDATE substitute_request SET admin_approved = 1 WHERE id = ?")
            .bind(req.id)
            .execute(&f._db.pool)
            .await
            .unwrap_err();
        let repo: crate::db::repository::RepoError = err.into();
        assert!(matches!(repo, crate::db::repository::RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_listings() {
        let f = fixture(strict()).await;
        let a = f.submit().await;
        let b = f.accepted().await;

        let mine = f.flow.list_requested_by(f.requester.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        let covering = f.flow.list_covering(f.substitute.id).await.unwrap();
        assert_eq!(covering.len(), 2);
        assert!(f.flow.list_covering(f.bystander.id).await.unwrap().is_empty());

        let waiting = f.flow.list_awaiting_approval().await.unwrap();
        assert_eq!(waiting.iter().map(|r| r.id).collect::<Vec<_>>(), vec![b.id]);
        assert_eq!(f.flow.count_awaiting_approval().await.unwrap(), 1);

        f.flow.admin_approve(b.id, &f.admin()).await.unwrap();
        f.flow.admin_reject(a.id, &f.admin()).await.unwrap();
        assert!(f.flow.list_awaiting_approval().await.unwrap().is_empty());
    }
}
