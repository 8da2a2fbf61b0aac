//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository contract for [`Account`] rows.
///
/// Account rows are owned by the identity layer; this service only reads
/// them and maintains the lockout counters and login stamps.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an active account by login email.
    ///
    /// Inactive accounts are treated as absent so the caller cannot tell
    /// the difference.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Look up an account by identifier, regardless of activation state.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Record one failed attempt and return the post-increment counter.
    ///
    /// The increment must be a storage-level atomic (`SET login_attempts =
    /// login_attempts + 1`), never a read-then-write pair: two concurrent
    /// failures must not both observe `threshold - 1`.
    async fn record_failed_attempt(&self, id: Uuid) -> Result<u32, DomainError>;

    /// Reset the failure counter and clear any lockout.
    async fn reset_attempts(&self, id: Uuid) -> Result<(), DomainError>;

    /// Set the lockout deadline.
    async fn lock_until(&self, id: Uuid, until: DateTime<Utc>) -> Result<(), DomainError>;

    /// Stamp a successful login (resets the counter, clears the lock,
    /// records timestamp and source IP).
    async fn record_login(&self, id: Uuid, source_ip: Option<String>) -> Result<(), DomainError>;
}
