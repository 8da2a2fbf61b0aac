//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::IssuedToken;
use crate::errors::DomainError;

use super::r#trait::SessionRepository;

/// In-memory session repository for tests.
pub struct MockSessionRepository {
    tokens: Arc<RwLock<HashMap<String, IssuedToken>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Direct row access for test assertions and setup.
    pub async fn get(&self, jti: &str) -> Option<IssuedToken> {
        self.tokens.read().await.get(jti).cloned()
    }

    /// Overwrite a row, for tests that manipulate expiry or revocation.
    pub async fn put(&self, token: IssuedToken) {
        self.tokens.write().await.insert(token.jti.clone(), token);
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn insert(&self, token: IssuedToken) -> Result<IssuedToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.jti) {
            return Err(DomainError::Validation {
                message: "Token identifier already exists".to_string(),
            });
        }
        tokens.insert(token.jti.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_jti(&self, jti: &str) -> Result<Option<IssuedToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(jti).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<IssuedToken>, DomainError> {
        let tokens = self.tokens.read().await;
        let mut rows: Vec<IssuedToken> = tokens
            .values()
            .filter(|t| t.subject_user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(rows)
    }

    async fn touch_last_used(&self, jti: &str) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.get_mut(jti) {
            token.touch();
        }
        Ok(())
    }

    async fn revoke(&self, jti: &str, reason: Option<String>) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(jti) {
            Some(token) if !token.is_revoked => {
                token.revoke(reason);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let mut count = 0;
        for token in tokens.values_mut() {
            if token.subject_user_id == user_id && !token.is_revoked {
                token.revoke(reason.clone());
                count += 1;
            }
        }
        Ok(count)
    }
}
