//! Key repository trait defining the interface for signing-key persistence.

use async_trait::async_trait;

use crate::domain::entities::key_pair::KeyPair;
use crate::errors::DomainError;

/// Repository contract for [`KeyPair`] persistence.
///
/// The key set is the shared source of truth for a fleet of stateless
/// instances: the "current primary key" is a queryable attribute of the
/// stored collection, never an in-process singleton.
#[async_trait]
pub trait KeyRepository: Send + Sync {
    /// Persist a new key pair.
    async fn save_key(&self, key: KeyPair) -> Result<KeyPair, DomainError>;

    /// All verification-eligible keys, newest first.
    ///
    /// An empty result during normal operation is a systemic fault; callers
    /// must treat authentication as unavailable rather than rejecting
    /// individual users.
    async fn find_active_keys(&self) -> Result<Vec<KeyPair>, DomainError>;

    /// The single key used for new issuance, if one is configured.
    async fn find_primary_key(&self) -> Result<Option<KeyPair>, DomainError>;

    /// Increment a key's usage counter.
    ///
    /// The counter is advisory telemetry; lost updates are tolerable and no
    /// strict serialization is required.
    async fn increment_usage(&self, key_id: &str) -> Result<(), DomainError>;

    /// Clear the primary flag on every key, ahead of promoting a successor.
    async fn demote_primary(&self) -> Result<(), DomainError>;

    /// Flip a key out of the verification set.
    ///
    /// Keys are never hard-deleted while issued, unexpired tokens may still
    /// reference them.
    async fn deactivate_key(&self, key_id: &str) -> Result<bool, DomainError>;
}
