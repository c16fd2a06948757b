use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use wordsense_backend::auth::jwks::{fetch_jwks, JwksCache};
use wordsense_backend::config::auth::AuthConfig;
use wordsense_backend::config::AppConfig;
use wordsense_backend::infra::state::build_state;
use wordsense_backend::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use wordsense_backend::{routes, telemetry, AppError, SecurityConfig};

/// Shared secret when configured, otherwise the issuer's published keys
/// (refetched later when a token names an unknown `kid`).
async fn load_security(auth: &AuthConfig) -> Result<SecurityConfig, AppError> {
    match &auth.jwt_secret {
        Some(secret) => Ok(SecurityConfig::shared(
            auth.issuer.clone(),
            auth.audience.clone(),
            secret.as_bytes(),
        )),
        None => {
            let url = auth.jwks_url();
            let keys = fetch_jwks(&url).await?;
            Ok(SecurityConfig::jwks(
                auth.issuer.clone(),
                auth.audience.clone(),
                Arc::new(JwksCache::new(url, keys)),
            ))
        }
    }
}

fn exit_with(context: &str, err: AppError) -> ! {
    error!(error = %err, "{context}");
    eprintln!("{context}: {err}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment comes from the runtime (docker env_file or a sourced .env).
    let config = AppConfig::from_env().unwrap_or_else(|e| exit_with("Invalid configuration", e));

    let security = load_security(&config.auth)
        .await
        .unwrap_or_else(|e| exit_with("Failed to load signing keys", e));

    let app_state = build_state()
        .with_db(config.db_kind)
        .with_security(security)
        .with_seed(config.seed_catalog)
        .build()
        .await
        .unwrap_or_else(|e| exit_with("Failed to build application state", e));

    info!(
        host = %config.host,
        port = config.port,
        db = config.db_kind.engine(),
        "Starting Word Sense backend"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
