//! Business services containing domain logic and use cases.

pub mod audit;
pub mod auth;
pub mod token;

// Re-export commonly used types
pub use audit::AuditService;
pub use auth::{AccountGuard, AuthService, AuthServiceConfig, PasswordVerifier, RequestContext};
pub use token::{Jwk, Jwks, Keyring, TokenCodec, TokenServiceConfig};
