//! Authentication request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use am_core::domain::value_objects::{AuthResponse, PublicUser, VerifiedContext};

/// Body of POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,

    /// Tenant to authenticate against, for multi-tenant deployments
    pub tenant_id: Option<Uuid>,

    pub device_name: Option<String>,
    pub device_fingerprint: Option<String>,
}

/// Public account fields echoed back to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<PublicUser> for UserDto {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}

/// Body returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub user: UserDto,
}

impl From<AuthResponse> for AuthResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
            expires_at: response.expires_at,
            user: response.user.into(),
        }
    }
}

/// Body returned by GET /api/v1/auth/verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: UserDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

impl From<VerifiedContext> for VerifyResponse {
    fn from(ctx: VerifiedContext) -> Self {
        let expires_at = DateTime::from_timestamp(ctx.claims.exp, 0).unwrap_or_else(Utc::now);
        Self {
            user: ctx.user.into(),
            tenant_id: ctx.tenant_id,
            jti: ctx.claims.jti,
            expires_at,
        }
    }
}

/// Body of POST /api/v1/auth/revoke. All fields optional; an empty body
/// revokes the bearer token itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevokeRequest {
    /// Specific token to revoke; defaults to the bearer
    pub token: Option<String>,
    /// Revoke every token of the calling subject
    pub all_tokens: Option<bool>,
    pub reason: Option<String>,
}

/// Body returned by revoke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub revoked_count: usize,
}
