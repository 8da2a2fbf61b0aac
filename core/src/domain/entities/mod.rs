//! Domain entities for the AuthMint token service.

pub mod account;
pub mod audit;
pub mod key_pair;
pub mod token;

pub use account::Account;
pub use audit::{AuditEventType, AuditLog};
pub use key_pair::{KeyPair, SigningAlgorithm};
pub use token::{Claims, IssuedToken, TokenType};
