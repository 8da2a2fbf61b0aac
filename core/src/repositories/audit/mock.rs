//! Mock implementation of AuditLogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::errors::DomainError;

use super::r#trait::AuditLogRepository;

/// In-memory audit repository for tests.
pub struct MockAuditLogRepository {
    entries: Arc<RwLock<Vec<AuditLog>>>,
    /// When set, every insert fails; used to assert that audit failures
    /// never block the primary operation.
    fail_writes: bool,
}

impl MockAuditLogRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            fail_writes: true,
        }
    }

    pub async fn entries(&self) -> Vec<AuditLog> {
        self.entries.read().await.clone()
    }

    pub async fn count_of(&self, event_type: AuditEventType) -> usize {
        self.entries
            .read()
            .await
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn insert(&self, log: AuditLog) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Internal {
                message: "audit sink unavailable".to_string(),
            });
        }
        self.entries.write().await.push(log);
        Ok(())
    }
}
