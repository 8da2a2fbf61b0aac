//! Issued-token (session) repository module.

mod r#trait;
pub use r#trait::SessionRepository;

#[cfg(test)]
mod mock;
#[cfg(test)]
pub use mock::MockSessionRepository;
