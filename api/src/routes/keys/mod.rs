//! Key publication endpoints.

pub mod jwks;
