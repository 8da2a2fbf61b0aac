//! Service entry point: configuration, dependency wiring and HTTP server.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use am_api::app::{self, AppState};
use am_api::config::ServerConfig;
use am_api::dto::ErrorResponse;
use am_core::services::audit::AuditService;
use am_core::services::auth::{AuthService, AuthServiceConfig};
use am_core::services::token::{Keyring, TokenCodec, TokenServiceConfig};
use am_infra::{
    create_pool, BcryptPasswordVerifier, DatabaseConfig, MySqlAccountRepository,
    MySqlAuditLogRepository, MySqlKeyRepository, MySqlSessionRepository,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();

    let pool = create_pool(&database_config).await?;

    let accounts = Arc::new(MySqlAccountRepository::new(pool.clone()));
    let sessions = Arc::new(MySqlSessionRepository::new(pool.clone()));
    let keys = Arc::new(MySqlKeyRepository::new(pool.clone()));
    let audit = AuditService::new(Arc::new(MySqlAuditLogRepository::new(pool)));

    let keyring = Keyring::new(keys);
    // A fresh deployment has no signing key yet; mint one before serving.
    let bootstrap_key = keyring.ensure_primary().await?;
    tracing::info!(kid = %bootstrap_key.key_id, "Primary signing key ready");

    let auth_service = Arc::new(AuthService::new(
        keyring.clone(),
        TokenCodec::new(TokenServiceConfig::default()),
        sessions,
        accounts,
        BcryptPasswordVerifier,
        audit,
        AuthServiceConfig::default(),
    ));

    let state = AppState {
        auth_service,
        keyring,
    };

    let bind_address = server_config.bind_address();
    tracing::info!(address = %bind_address, "Starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(
                app::configure::<
                    MySqlKeyRepository,
                    MySqlSessionRepository,
                    MySqlAccountRepository,
                    BcryptPasswordVerifier,
                    MySqlAuditLogRepository,
                >,
            )
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound()
                    .json(ErrorResponse::new("NOT_FOUND", "Unknown endpoint"))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
