//! # AuthMint API
//!
//! HTTP layer for the AuthMint token service: request/response DTOs,
//! domain-error → HTTP mapping, and the actix-web route handlers.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
