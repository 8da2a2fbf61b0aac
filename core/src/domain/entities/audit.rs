//! Audit log entity for authentication and token lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types recorded by the audit trail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Login events
    LoginAttempt,
    LoginSuccess,
    LoginFailure,

    // Lockout events
    AccountLocked,

    // Token lifecycle events
    TokenIssued,
    TokenRefreshed,
    TokenRevoked,
    TokenVerificationFailure,

    // Key lifecycle events
    KeyRotated,
}

impl AuditEventType {
    /// Convert to string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginAttempt => "LOGIN_ATTEMPT",
            Self::LoginSuccess => "LOGIN_SUCCESS",
            Self::LoginFailure => "LOGIN_FAILURE",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::TokenIssued => "TOKEN_ISSUED",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::TokenVerificationFailure => "TOKEN_VERIFICATION_FAILURE",
            Self::KeyRotated => "KEY_ROTATED",
        }
    }

    /// Parse from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOGIN_ATTEMPT" => Some(Self::LoginAttempt),
            "LOGIN_SUCCESS" => Some(Self::LoginSuccess),
            "LOGIN_FAILURE" => Some(Self::LoginFailure),
            "ACCOUNT_LOCKED" => Some(Self::AccountLocked),
            "TOKEN_ISSUED" => Some(Self::TokenIssued),
            "TOKEN_REFRESHED" => Some(Self::TokenRefreshed),
            "TOKEN_REVOKED" => Some(Self::TokenRevoked),
            "TOKEN_VERIFICATION_FAILURE" => Some(Self::TokenVerificationFailure),
            "KEY_ROTATED" => Some(Self::KeyRotated),
            _ => None,
        }
    }
}

/// An immutable audit entry.
///
/// Audit rows are written on every failed login, successful login, and
/// revocation; a failed write is logged and never propagated to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    /// Unique identifier for the entry
    pub id: Uuid,

    /// Type of event
    pub event_type: AuditEventType,

    /// Acting account, when known
    pub actor_user_id: Option<Uuid>,

    /// Login email the event concerns, when applicable
    pub email: Option<String>,

    /// Target token `jti`, for token lifecycle events
    pub target_jti: Option<String>,

    /// Free-form reason (revocation reason, failure cause)
    pub reason: Option<String>,

    /// Source IP of the request
    pub source_ip: Option<String>,

    /// User agent of the request
    pub user_agent: Option<String>,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Creates a new audit entry for an event type.
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            actor_user_id: None,
            email: None,
            target_jti: None,
            reason: None,
            source_ip: None,
            user_agent: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the acting account.
    pub fn with_actor(mut self, actor: Uuid) -> Self {
        self.actor_user_id = Some(actor);
        self
    }

    /// Attaches the login email the event concerns.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attaches a target token identifier.
    pub fn with_target(mut self, jti: impl Into<String>) -> Self {
        self.target_jti = Some(jti.into());
        self
    }

    /// Attaches a free-form reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches request context.
    pub fn with_request_context(
        mut self,
        source_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.source_ip = source_ip;
        self.user_agent = user_agent;
        self
    }
}
