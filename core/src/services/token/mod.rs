//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - RS256 signing and multi-key verification
//! - Key generation, rotation and JWKS export
//! - Claim validation (issuer, audience, expiry)

mod codec;
mod config;
mod keyring;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use keyring::{Jwk, Jwks, Keyring};
