//! POST /api/v1/auth/refresh

use actix_web::{web, HttpRequest, HttpResponse};

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::PasswordVerifier;

use crate::app::AppState;
use crate::dto::AuthResponseDto;
use crate::handlers::handle_domain_error;

use super::{bearer_token, missing_bearer, request_context};

/// Exchanges a recently expired token for a fresh one.
pub async fn refresh<K, S, A, P, L>(
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

    let ctx = request_context(&req, None, None);

    match state.auth_service.refresh(token, &ctx).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(e) => handle_domain_error(e),
    }
}
