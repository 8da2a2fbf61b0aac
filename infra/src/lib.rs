//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's repository and verifier
//! traits:
//! - **Database**: MySQL repositories using SQLx
//! - **Security**: bcrypt password verification

pub mod config;
pub mod database;
pub mod security;

pub use config::DatabaseConfig;
pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlAccountRepository, MySqlAuditLogRepository, MySqlKeyRepository, MySqlSessionRepository,
};
pub use security::BcryptPasswordVerifier;
