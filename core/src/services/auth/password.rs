//! Password verification seam.

use crate::errors::DomainError;

/// Checks a cleartext password against a stored hash.
///
/// The hash format is opaque to the core; the implementation lives in the
/// infrastructure layer so the hashing scheme can change without touching
/// the login flow.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Treats the stored "hash" as the cleartext password. Test only.
    pub struct PlainTextVerifier;

    impl PasswordVerifier for PlainTextVerifier {
        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            Ok(password == hash)
        }
    }
}
