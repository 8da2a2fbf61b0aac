//! MySQL repository implementations.

mod account_repository_impl;
mod audit_repository_impl;
mod key_repository_impl;
mod session_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use audit_repository_impl::MySqlAuditLogRepository;
pub use key_repository_impl::MySqlKeyRepository;
pub use session_repository_impl::MySqlSessionRepository;
