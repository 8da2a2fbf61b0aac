//! Configuration for the token codec

use crate::domain::entities::token::{JWT_AUDIENCE, JWT_ISSUER};

/// Configuration for token signing and validation.
///
/// Lifetimes are fixed policy constants on the token entities; this config
/// carries only the claim values the codec checks on every verification.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }
}
