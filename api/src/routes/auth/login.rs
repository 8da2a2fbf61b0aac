//! POST /api/v1/auth/login

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::PasswordVerifier;

use crate::app::AppState;
use crate::dto::{AuthResponseDto, ErrorResponse, LoginRequest};
use crate::handlers::handle_domain_error;

use super::request_context;

/// Authenticates credentials and returns a signed access token.
pub async fn login<K, S, A, P, L>(
    state: web::Data<AppState<K, S, A, P, L>>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> HttpResponse
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    let body = body.into_inner();
    if let Err(errors) = body.validate() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("VALIDATION_ERROR", errors.to_string()));
    }

    let ctx = request_context(&req, body.device_name, body.device_fingerprint);

    match state
        .auth_service
        .login(&body.email, &body.password, body.tenant_id, &ctx)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(e) => handle_domain_error(e),
    }
}
