//! GET /.well-known/jwks.json

use actix_web::http::header;
use actix_web::{web, HttpResponse};

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::PasswordVerifier;

use crate::app::AppState;
use crate::handlers::handle_domain_error;

/// Publishes the active verification keys as a JWK set.
///
/// The response is cacheable for a bounded interval so verifiers pick up
/// rotated keys without hammering the endpoint.
pub async fn jwks<K, S, A, P, L>(state: web::Data<AppState<K, S, A, P, L>>) -> HttpResponse
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    match state.keyring.jwks().await {
        Ok(set) => HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
            .json(set),
        Err(e) => handle_domain_error(e),
    }
}
