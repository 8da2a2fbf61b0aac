//! Domain-error → HTTP response mapping.
//!
//! Credential and token problems are 401, an enforced lockout is 423,
//! acting on another subject's token is 403, and an unusable key set is
//! 503 - the fault is the service's, not the caller's. Internal detail is
//! logged, never echoed to clients.

use actix_web::HttpResponse;

use am_core::errors::{AuthError, DomainError, KeyError, TokenError};

use crate::dto::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Key(key_error) => handle_key_error(key_error),
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource),
        )),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

fn handle_auth_error(error: AuthError) -> HttpResponse {
    let code = error.code();
    match error {
        AuthError::InvalidCredentials { attempts_remaining } => {
            let mut body = ErrorResponse::new(code, "Invalid credentials");
            if let Some(remaining) = attempts_remaining {
                body = body.with_attempts_remaining(remaining);
            }
            HttpResponse::Unauthorized().json(body)
        }
        AuthError::AccountLocked { locked_until } => HttpResponse::Locked().json(
            ErrorResponse::new(code, "Account temporarily locked")
                .with_locked_until(locked_until),
        ),
        AuthError::AccountInactive => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(code, "Account is not active"))
        }
        AuthError::Unauthorized => HttpResponse::Forbidden().json(ErrorResponse::new(
            code,
            "Not permitted to act on this token",
        )),
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    let code = error.code();
    match error {
        TokenError::EncodingError { message } => {
            tracing::error!(error = %message, "Key material fault");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new(code, "An internal error occurred"))
        }
        TokenError::SigningFailure => HttpResponse::InternalServerError()
            .json(ErrorResponse::new(code, "Token signing failed")),
        other => HttpResponse::Unauthorized().json(ErrorResponse::new(code, other.to_string())),
    }
}

fn handle_key_error(error: KeyError) -> HttpResponse {
    let code = error.code();
    match error {
        KeyError::NoActiveKeys | KeyError::NoPrimaryKey => {
            tracing::error!("Signing key set unusable, authentication unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                code,
                "Authentication is temporarily unavailable",
            ))
        }
        KeyError::GenerationFailed { message } | KeyError::KeyLoadError { message } => {
            tracing::error!(error = %message, "Key operation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                code,
                "An internal error occurred",
            ))
        }
    }
}
