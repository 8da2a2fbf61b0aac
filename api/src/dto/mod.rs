//! Request and response DTOs.

pub mod auth;
pub mod error;

pub use auth::{
    AuthResponseDto, LoginRequest, RevokeRequest, RevokeResponse, UserDto, VerifyResponse,
};
pub use error::ErrorResponse;
