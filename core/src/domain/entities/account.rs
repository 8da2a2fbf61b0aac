//! Account entity: the authentication subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A credentialed account owned by the identity layer.
///
/// The password hash is opaque to the core; verification is delegated to the
/// injected [`PasswordVerifier`](crate::services::auth::PasswordVerifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Login email, unique per deployment
    pub email: String,

    /// Opaque password hash, never exposed outside the core
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// Coarse role, echoed into token claims
    pub role: String,

    /// Owning tenant, when the deployment is multi-tenant
    pub tenant_id: Option<Uuid>,

    /// Whether the account may authenticate at all
    pub is_active: bool,

    /// Consecutive failures since the last success
    pub login_attempts: u32,

    /// When set and in the future, all attempts are rejected
    pub locked_until: Option<DateTime<Utc>>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Source IP of the last successful login
    pub last_source_ip: Option<String>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new active account.
    pub fn new(email: String, password_hash: String, full_name: String, role: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            role,
            tenant_id: None,
            is_active: true,
            login_attempts: 0,
            locked_until: None,
            last_login_at: None,
            last_source_ip: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns the account to a tenant.
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Whether a lockout is currently in force.
    pub fn is_locked(&self) -> bool {
        matches!(self.locked_until, Some(until) if Utc::now() < until)
    }

    /// Whether a past lockout has elapsed without being cleared.
    pub fn lock_expired(&self) -> bool {
        matches!(self.locked_until, Some(until) if Utc::now() >= until)
    }

    /// Records a successful login.
    pub fn record_login(&mut self, source_ip: Option<String>) {
        self.login_attempts = 0;
        self.locked_until = None;
        self.last_login_at = Some(Utc::now());
        self.last_source_ip = source_ip;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_account() -> Account {
        Account::new(
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            "Ada Example".to_string(),
            "member".to_string(),
        )
    }

    #[test]
    fn test_new_account_defaults() {
        let account = sample_account();

        assert!(account.is_active);
        assert_eq!(account.login_attempts, 0);
        assert!(account.locked_until.is_none());
        assert!(!account.is_locked());
        assert!(account.tenant_id.is_none());
    }

    #[test]
    fn test_lockout_state() {
        let mut account = sample_account();

        account.locked_until = Some(Utc::now() + Duration::minutes(30));
        assert!(account.is_locked());
        assert!(!account.lock_expired());

        account.locked_until = Some(Utc::now() - Duration::minutes(1));
        assert!(!account.is_locked());
        assert!(account.lock_expired());
    }

    #[test]
    fn test_record_login_resets_counters() {
        let mut account = sample_account();
        account.login_attempts = 3;
        account.locked_until = Some(Utc::now() - Duration::minutes(1));

        account.record_login(Some("203.0.113.9".to_string()));

        assert_eq!(account.login_attempts, 0);
        assert!(account.locked_until.is_none());
        assert!(account.last_login_at.is_some());
        assert_eq!(account.last_source_ip.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = sample_account();
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("$2b$12$hash"));
    }
}
