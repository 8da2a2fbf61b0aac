//! Session repository trait defining the interface for issued-token records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::IssuedToken;
use crate::errors::DomainError;

/// Repository contract for [`IssuedToken`] persistence.
///
/// One row per token ever minted, keyed by `jti`. Rows are mutated only to
/// stamp `last_used_at` or the revocation fields, and never deleted - they
/// are retained for audit. These rows are owned exclusively by the
/// authentication service; no other component writes them.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new issuance record.
    ///
    /// Fails when the `jti` already exists - token identifiers are never
    /// reused.
    async fn insert(&self, token: IssuedToken) -> Result<IssuedToken, DomainError>;

    /// Look up a record by its token identifier.
    async fn find_by_jti(&self, jti: &str) -> Result<Option<IssuedToken>, DomainError>;

    /// All records belonging to a subject, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<IssuedToken>, DomainError>;

    /// Stamp a record with a successful verification.
    async fn touch_last_used(&self, jti: &str) -> Result<(), DomainError>;

    /// Flip a single record to revoked.
    ///
    /// Returns `false` when the record does not exist or was already
    /// revoked.
    async fn revoke(&self, jti: &str, reason: Option<String>) -> Result<bool, DomainError>;

    /// Flip every unrevoked record of a subject to revoked.
    ///
    /// Returns the number of rows flipped.
    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<usize, DomainError>;
}
