//! MySQL implementation of the AuditLogRepository trait.
//!
//! Audit entries land in the auth_audit_log table, insert-only.

use async_trait::async_trait;
use sqlx::MySqlPool;

use am_core::domain::entities::audit::AuditLog;
use am_core::errors::DomainError;
use am_core::repositories::AuditLogRepository;

/// MySQL implementation of AuditLogRepository
pub struct MySqlAuditLogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn insert(&self, log: AuditLog) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO auth_audit_log (
                id, event_type, actor_user_id, email, target_jti,
                reason, source_ip, user_agent, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(log.id.to_string())
            .bind(log.event_type.as_str())
            .bind(log.actor_user_id.map(|u| u.to_string()))
            .bind(&log.email)
            .bind(&log.target_jti)
            .bind(&log.reason)
            .bind(&log.source_ip)
            .bind(&log.user_agent)
            .bind(log.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert audit entry: {}", e),
            })?;

        Ok(())
    }
}
