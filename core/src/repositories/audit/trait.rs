//! Audit log repository trait.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

/// Repository contract for immutable audit entries.
///
/// Entries are insert-only; there is no update or delete surface.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist one audit entry.
    async fn insert(&self, log: AuditLog) -> Result<(), DomainError>;
}
