//! Security implementations backing the core's verifier traits.

mod bcrypt_verifier;

pub use bcrypt_verifier::BcryptPasswordVerifier;
