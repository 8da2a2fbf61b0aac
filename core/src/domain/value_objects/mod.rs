//! Value objects returned by the authentication services.

pub mod auth_response;

pub use auth_response::{AuthResponse, PublicUser, RevokeOutcome, VerifiedContext};
