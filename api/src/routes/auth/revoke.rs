//! POST /api/v1/auth/revoke

use actix_web::{web, HttpRequest, HttpResponse};

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::PasswordVerifier;

use crate::app::AppState;
use crate::dto::{RevokeRequest, RevokeResponse};
use crate::handlers::handle_domain_error;

use super::{bearer_token, missing_bearer, request_context};

/// Revokes the bearer token, a named token of the same subject, or every
/// token of the subject. An absent or empty body revokes the bearer itself.
pub async fn revoke<K, S, A, P, L>(
    state: web::Data<AppState<K, S, A, P, L>>,
    req: HttpRequest,
    body: Option<web::Json<RevokeRequest>>,
) -> HttpResponse
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    let Some(bearer) = bearer_token(&req) else {
        return missing_bearer();
    };

    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let ctx = request_context(&req, None, None);

    match state
        .auth_service
        .revoke(
            bearer,
            request.token.as_deref(),
            request.all_tokens.unwrap_or(false),
            request.reason,
            &ctx,
        )
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(RevokeResponse {
            revoked_count: outcome.revoked_count,
        }),
        Err(e) => handle_domain_error(e),
    }
}
