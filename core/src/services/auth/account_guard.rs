//! Brute-force lockout enforcement around account rows.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};
use crate::repositories::AccountRepository;

use super::config::AuthServiceConfig;

/// Result of recording one failed login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    /// Post-increment failure counter
    pub attempts: u32,
    /// Set when this failure crossed the threshold and locked the account
    pub locked_until: Option<DateTime<Utc>>,
}

impl FailureOutcome {
    /// Attempts left before lockout.
    pub fn attempts_remaining(&self, max: u32) -> u32 {
        max.saturating_sub(self.attempts)
    }
}

/// Enforces the lockout policy.
///
/// The failure counter is incremented atomically in storage, so concurrent
/// failures across instances each observe a distinct count and exactly one
/// of them crosses the threshold.
pub struct AccountGuard<A: AccountRepository> {
    accounts: Arc<A>,
    config: AuthServiceConfig,
}

impl<A: AccountRepository> AccountGuard<A> {
    pub fn new(accounts: Arc<A>, config: AuthServiceConfig) -> Self {
        Self { accounts, config }
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Rejects the attempt while a lockout is in force.
    ///
    /// An expired lockout is cleared here rather than by a background job:
    /// the first attempt after the deadline resets the counter and proceeds
    /// with a clean slate.
    pub async fn ensure_unlocked(&self, account: &Account) -> Result<(), DomainError> {
        if let Some(until) = account.locked_until {
            if account.is_locked() {
                return Err(AuthError::AccountLocked {
                    locked_until: until,
                }
                .into());
            }
            self.accounts.reset_attempts(account.id).await?;
        }
        Ok(())
    }

    /// Records one failed attempt, locking the account at the threshold.
    pub async fn record_failure(&self, account: &Account) -> Result<FailureOutcome, DomainError> {
        let attempts = self.accounts.record_failed_attempt(account.id).await?;

        if attempts >= self.config.max_failed_attempts {
            let until = Utc::now() + Duration::minutes(self.config.lockout_duration_minutes);
            self.accounts.lock_until(account.id, until).await?;

            tracing::warn!(
                account_id = %account.id,
                attempts = attempts,
                locked_until = %until,
                "Account locked after repeated login failures"
            );

            return Ok(FailureOutcome {
                attempts,
                locked_until: Some(until),
            });
        }

        Ok(FailureOutcome {
            attempts,
            locked_until: None,
        })
    }

    /// Stamps a successful login, resetting the counter and any stale lock.
    pub async fn record_success(
        &self,
        account: &Account,
        source_ip: Option<String>,
    ) -> Result<(), DomainError> {
        self.accounts.record_login(account.id, source_ip).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAccountRepository;

    fn sample_account() -> Account {
        Account::new(
            "a@x.com".to_string(),
            "hash".to_string(),
            "Ada Example".to_string(),
            "member".to_string(),
        )
    }

    fn guard(accounts: Arc<MockAccountRepository>) -> AccountGuard<MockAccountRepository> {
        AccountGuard::new(accounts, AuthServiceConfig::default())
    }

    #[tokio::test]
    async fn test_failures_below_threshold_do_not_lock() {
        let account = sample_account();
        let accounts = Arc::new(MockAccountRepository::with_account(account.clone()).await);
        let guard = guard(Arc::clone(&accounts));

        for expected in 1..=4u32 {
            let outcome = guard.record_failure(&account).await.unwrap();
            assert_eq!(outcome.attempts, expected);
            assert!(outcome.locked_until.is_none());
        }
        assert_eq!(
            guard
                .record_failure(&account)
                .await
                .unwrap()
                .attempts_remaining(5),
            0
        );
    }

    #[tokio::test]
    async fn test_fifth_failure_locks_account() {
        let account = sample_account();
        let accounts = Arc::new(MockAccountRepository::with_account(account.clone()).await);
        let guard = guard(Arc::clone(&accounts));

        for _ in 0..4 {
            guard.record_failure(&account).await.unwrap();
        }
        let outcome = guard.record_failure(&account).await.unwrap();

        assert_eq!(outcome.attempts, 5);
        assert!(outcome.locked_until.is_some());

        let stored = accounts.get(account.id).await.unwrap();
        assert!(stored.is_locked());
    }

    #[tokio::test]
    async fn test_locked_account_is_rejected() {
        let mut account = sample_account();
        account.locked_until = Some(Utc::now() + Duration::minutes(10));
        let accounts = Arc::new(MockAccountRepository::with_account(account.clone()).await);
        let guard = guard(accounts);

        let err = guard.ensure_unlocked(&account).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::AccountLocked { .. })
        ));
    }

    #[tokio::test]
    async fn test_expired_lock_is_cleared_on_next_attempt() {
        let mut account = sample_account();
        account.login_attempts = 5;
        account.locked_until = Some(Utc::now() - Duration::minutes(1));
        let accounts = Arc::new(MockAccountRepository::with_account(account.clone()).await);
        let guard = guard(Arc::clone(&accounts));

        guard.ensure_unlocked(&account).await.unwrap();

        let stored = accounts.get(account.id).await.unwrap();
        assert_eq!(stored.login_attempts, 0);
        assert!(stored.locked_until.is_none());
    }
}
