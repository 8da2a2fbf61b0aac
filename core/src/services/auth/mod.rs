//! Authentication service module
//!
//! This module provides the credential and token lifecycle flows:
//! - Login with brute-force lockout
//! - Bearer token verification
//! - Refresh within the post-expiry grace window
//! - Revocation of one token or a subject's whole set

mod account_guard;
mod config;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use account_guard::{AccountGuard, FailureOutcome};
pub use config::AuthServiceConfig;
pub use password::PasswordVerifier;
pub use service::{AuthService, RequestContext};
