//! Repository interfaces for durable state, with in-memory mocks for tests.

pub mod account;
pub mod audit;
pub mod key;
pub mod session;

pub use account::AccountRepository;
pub use audit::{AuditLogRepository, NoOpAuditLogRepository};
pub use key::KeyRepository;
pub use session::SessionRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use audit::MockAuditLogRepository;
#[cfg(test)]
pub use key::MockKeyRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
