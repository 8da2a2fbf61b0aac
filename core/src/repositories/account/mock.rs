//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::r#trait::AccountRepository;

/// In-memory account repository for tests.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn with_account(account: Account) -> Self {
        let repo = Self::new();
        repo.accounts.write().await.push(account);
        repo
    }

    pub async fn add(&self, account: Account) {
        self.accounts.write().await.push(account);
    }

    /// Direct row access for test assertions.
    pub async fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.read().await.iter().find(|a| a.id == id).cloned()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.email == email && a.is_active)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<u32, DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("account {}", id),
            })?;
        account.login_attempts += 1;
        account.updated_at = Utc::now();
        Ok(account.login_attempts)
    }

    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.login_attempts = 0;
            account.locked_until = None;
            account.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.locked_until = Some(until);
            account.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn record_login(&self, id: Uuid, source_ip: Option<String>) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.iter_mut().find(|a| a.id == id) {
            account.record_login(source_ip);
        }
        Ok(())
    }
}
