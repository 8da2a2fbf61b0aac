//! Audit service for recording authentication and token lifecycle events.
//!
//! Audit writes are best-effort: a failed write is logged through tracing
//! and never surfaces to the caller, so the audit trail cannot take the
//! login path down with it.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::repositories::AuditLogRepository;

use crate::services::auth::RequestContext;

/// Writes audit entries through the configured repository.
pub struct AuditService<R: AuditLogRepository> {
    repository: Arc<R>,
}

impl<R: AuditLogRepository> Clone for AuditService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: AuditLogRepository> AuditService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persist one entry, swallowing failures.
    pub async fn record(&self, log: AuditLog) {
        let event = log.event_type;
        if let Err(e) = self.repository.insert(log).await {
            tracing::warn!(event = event.as_str(), error = %e, "Audit write failed");
        }
    }

    pub async fn login_attempt(&self, email: &str, ctx: &RequestContext) {
        self.record(
            AuditLog::new(AuditEventType::LoginAttempt)
                .with_email(email)
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn login_failure(
        &self,
        email: &str,
        actor: Option<Uuid>,
        reason: &str,
        ctx: &RequestContext,
    ) {
        let mut log = AuditLog::new(AuditEventType::LoginFailure)
            .with_email(email)
            .with_reason(reason)
            .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone());
        if let Some(actor) = actor {
            log = log.with_actor(actor);
        }
        self.record(log).await;
    }

    pub async fn login_success(&self, actor: Uuid, email: &str, ctx: &RequestContext) {
        self.record(
            AuditLog::new(AuditEventType::LoginSuccess)
                .with_actor(actor)
                .with_email(email)
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn account_locked(&self, actor: Uuid, email: &str, ctx: &RequestContext) {
        self.record(
            AuditLog::new(AuditEventType::AccountLocked)
                .with_actor(actor)
                .with_email(email)
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn token_issued(&self, actor: Uuid, jti: &str, ctx: &RequestContext) {
        self.record(
            AuditLog::new(AuditEventType::TokenIssued)
                .with_actor(actor)
                .with_target(jti)
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn token_refreshed(
        &self,
        actor: Uuid,
        old_jti: &str,
        new_jti: &str,
        ctx: &RequestContext,
    ) {
        self.record(
            AuditLog::new(AuditEventType::TokenRefreshed)
                .with_actor(actor)
                .with_target(old_jti)
                .with_reason(format!("succeeded by {}", new_jti))
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn token_revoked(
        &self,
        actor: Uuid,
        jti: Option<&str>,
        reason: Option<String>,
        ctx: &RequestContext,
    ) {
        let mut log = AuditLog::new(AuditEventType::TokenRevoked)
            .with_actor(actor)
            .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone());
        if let Some(jti) = jti {
            log = log.with_target(jti);
        }
        if let Some(reason) = reason {
            log = log.with_reason(reason);
        }
        self.record(log).await;
    }

    pub async fn verification_failure(&self, reason: &str, ctx: &RequestContext) {
        self.record(
            AuditLog::new(AuditEventType::TokenVerificationFailure)
                .with_reason(reason)
                .with_request_context(ctx.source_ip.clone(), ctx.user_agent.clone()),
        )
        .await;
    }

    pub async fn key_rotated(&self, key_id: &str) {
        self.record(AuditLog::new(AuditEventType::KeyRotated).with_target(key_id))
            .await;
    }
}
