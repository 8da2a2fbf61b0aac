//! bcrypt-backed password verification.

use am_core::errors::DomainError;
use am_core::services::auth::PasswordVerifier;

/// Verifies passwords against bcrypt hashes stored on account rows.
pub struct BcryptPasswordVerifier;

impl BcryptPasswordVerifier {
    /// Hashes a password at the default cost. Used by provisioning tools,
    /// never on the login path.
    pub fn hash(password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        // An unparseable hash is a data fault, not a wrong password.
        bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }
}
