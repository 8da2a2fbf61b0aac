//! Domain-specific error types for authentication and token operations.
//!
//! Error messages here are safe to surface; internal causes (parse errors,
//! crypto faults) are wrapped with detail for logging but translated to
//! generic messages at the API boundary.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Generic credential failure; never distinguishes a missing account
    /// from a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials {
        /// Attempts left before lockout, when the account exists
        attempts_remaining: Option<u32>,
    },

    #[error("Account locked until {locked_until}")]
    AccountLocked { locked_until: DateTime<Utc> },

    #[error("Account inactive")]
    AccountInactive,

    /// Attempt to act on another subject's token.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Token-related errors.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token")]
    TokenMalformed,

    #[error("Token algorithm mismatch")]
    AlgorithmMismatch,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    /// Structurally valid token with no matching issuance record.
    #[error("Token record not found")]
    TokenRecordMissing,

    #[error("Key material could not be decoded: {message}")]
    EncodingError { message: String },

    #[error("Token signing failed")]
    SigningFailure,
}

/// Key-store errors. These are systemic configuration faults, surfaced as
/// service-unavailable rather than per-user rejections.
#[derive(Error, Debug)]
pub enum KeyError {
    /// The verification key set is empty; authentication is unavailable.
    #[error("No active signing keys")]
    NoActiveKeys,

    /// No key is marked primary; new tokens cannot be issued.
    #[error("No primary signing key")]
    NoPrimaryKey,

    #[error("Key generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("Key material could not be loaded: {message}")]
    KeyLoadError { message: String },
}

impl AuthError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::AccountLocked { .. } => "ACCOUNT_LOCKED",
            Self::AccountInactive => "ACCOUNT_INACTIVE",
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }
}

impl TokenError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenMalformed => "TOKEN_MALFORMED",
            Self::AlgorithmMismatch => "TOKEN_MALFORMED",
            Self::InvalidSignature => "TOKEN_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::TokenRecordMissing => "TOKEN_RECORD_MISSING",
            Self::EncodingError { .. } => "TOKEN_ENCODING_ERROR",
            Self::SigningFailure => "SIGNING_FAILURE",
        }
    }
}

impl KeyError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoActiveKeys => "KEY_SERVICE_UNAVAILABLE",
            Self::NoPrimaryKey => "KEY_SERVICE_UNAVAILABLE",
            Self::GenerationFailed { .. } => "KEY_GENERATION_FAILED",
            Self::KeyLoadError { .. } => "KEY_LOAD_ERROR",
        }
    }
}
