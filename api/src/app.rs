//! Application state and route wiring.

use std::sync::Arc;

use actix_web::web;

use am_core::repositories::{
    AccountRepository, AuditLogRepository, KeyRepository, SessionRepository,
};
use am_core::services::auth::{AuthService, PasswordVerifier};
use am_core::services::token::Keyring;

use crate::routes;

/// Application state that holds shared services
pub struct AppState<K, S, A, P, L>
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    pub auth_service: Arc<AuthService<K, S, A, P, L>>,
    pub keyring: Keyring<K>,
}

impl<K, S, A, P, L> Clone for AppState<K, S, A, P, L>
where
    K: KeyRepository,
    S: SessionRepository,
    A: AccountRepository,
    P: PasswordVerifier,
    L: AuditLogRepository,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            keyring: self.keyring.clone(),
        }
    }
}

/// Registers every route against a concrete state type.
pub fn configure<K, S, A, P, L>(cfg: &mut web::ServiceConfig)
where
    K: KeyRepository + 'static,
    S: SessionRepository + 'static,
    A: AccountRepository + 'static,
    P: PasswordVerifier + 'static,
    L: AuditLogRepository + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(routes::auth::login::login::<K, S, A, P, L>))
            .route("/verify", web::get().to(routes::auth::verify::verify::<K, S, A, P, L>))
            .route(
                "/refresh",
                web::post().to(routes::auth::refresh::refresh::<K, S, A, P, L>),
            )
            .route(
                "/revoke",
                web::post().to(routes::auth::revoke::revoke::<K, S, A, P, L>),
            ),
    )
    .route(
        "/.well-known/jwks.json",
        web::get().to(routes::keys::jwks::jwks::<K, S, A, P, L>),
    )
    .route("/health", web::get().to(routes::health::health_check));
}
