//! Mock implementation of KeyRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::key_pair::KeyPair;
use crate::errors::DomainError;

use super::r#trait::KeyRepository;

/// In-memory key repository for tests.
pub struct MockKeyRepository {
    keys: Arc<RwLock<Vec<KeyPair>>>,
}

impl MockKeyRepository {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn with_keys(keys: Vec<KeyPair>) -> Self {
        let repo = Self::new();
        *repo.keys.write().await = keys;
        repo
    }
}

impl Default for MockKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyRepository for MockKeyRepository {
    async fn save_key(&self, key: KeyPair) -> Result<KeyPair, DomainError> {
        let mut keys = self.keys.write().await;
        if keys.iter().any(|k| k.key_id == key.key_id) {
            return Err(DomainError::Validation {
                message: "Key already exists".to_string(),
            });
        }
        keys.push(key.clone());
        Ok(key)
    }

    async fn find_active_keys(&self) -> Result<Vec<KeyPair>, DomainError> {
        let keys = self.keys.read().await;
        let mut active: Vec<KeyPair> = keys.iter().filter(|k| k.is_active).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn find_primary_key(&self) -> Result<Option<KeyPair>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.iter().find(|k| k.is_active && k.is_primary).cloned())
    }

    async fn increment_usage(&self, key_id: &str) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;
        if let Some(key) = keys.iter_mut().find(|k| k.key_id == key_id) {
            key.usage_count += 1;
        }
        Ok(())
    }

    async fn demote_primary(&self) -> Result<(), DomainError> {
        let mut keys = self.keys.write().await;
        for key in keys.iter_mut() {
            key.is_primary = false;
        }
        Ok(())
    }

    async fn deactivate_key(&self, key_id: &str) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        if let Some(key) = keys.iter_mut().find(|k| k.key_id == key_id) {
            key.deactivate();
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
