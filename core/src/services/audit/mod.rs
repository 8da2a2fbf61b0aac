//! Audit trail service.

mod service;

pub use service::AuditService;
