//! Signing key repository module.

mod r#trait;
pub use r#trait::KeyRepository;

#[cfg(test)]
mod mock;
#[cfg(test)]
pub use mock::MockKeyRepository;
