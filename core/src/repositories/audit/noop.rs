//! No-op audit repository for deployments without an audit sink.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

use super::r#trait::AuditLogRepository;

/// Discards every entry. Used as the default audit sink in wiring that has
/// not configured one.
pub struct NoOpAuditLogRepository;

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn insert(&self, _log: AuditLog) -> Result<(), DomainError> {
        Ok(())
    }
}
