//! Authentication response value objects for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::Claims;

/// Public account fields safe to return to callers.
///
/// The password hash never leaves the core; this projection is the only
/// account shape that crosses the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Account identifier
    pub id: Uuid,

    /// Login email
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Coarse role
    pub role: String,
}

impl From<&Account> for PublicUser {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role.clone(),
        }
    }
}

/// Response returned after a successful login or refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT access token
    pub access_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// Absolute expiry of the access token
    pub expires_at: DateTime<Utc>,

    /// Public fields of the authenticated account
    pub user: PublicUser,
}

impl AuthResponse {
    /// Creates a response from a signed token and its claims.
    pub fn new(access_token: String, claims: &Claims, user: PublicUser) -> Self {
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: (claims.exp - claims.iat).max(0),
            expires_at,
            user,
        }
    }
}

/// Resolved context for an accepted bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedContext {
    /// Public fields of the token's subject
    pub user: PublicUser,

    /// Owning tenant, when multi-tenant
    pub tenant_id: Option<Uuid>,

    /// The verified claims
    pub claims: Claims,
}

/// Result of a revocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeOutcome {
    /// Number of issuance records flipped to revoked
    pub revoked_count: usize,
}
