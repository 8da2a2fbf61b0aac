//! GET /api/v1/auth/verify

use actix_web::{web, HttpRequest, HttpResponse};

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::PasswordVerifier;

use crate::app::AppState;
use crate::dto::VerifyResponse;
use crate::handlers::handle_domain_error;

use super::{bearer_token, missing_bearer};

/// Validates the bearer token and returns the authenticated context.
pub async fn verify<K, S, A, P, L>(
    state: web::Data<AppState<K, S, A, P, L>>,
    req: HttpRequest,
) -> HttpResponse
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    let Some(token) = bearer_token(&req) else {
        return missing_bearer();
    };

    match state.auth_service.verify(token).await {
        Ok(ctx) => HttpResponse::Ok().json(VerifyResponse::from(ctx)),
        Err(e) => handle_domain_error(e),
    }
}
