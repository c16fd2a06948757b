#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod websocket_client;

use wordsense_backend::config::db::DbKind;
use wordsense_backend::infra::state::build_state;
use wordsense_backend::{AppError, AppState, SecurityConfig};

#[allow(unused_imports)]
pub use app_builder::create_test_app;

/// Issuer/secret pair every integration test signs tokens with.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::shared(
        "https://auth.wordsense.test",
        Some("wordsense-api".to_string()),
        "integration_test_secret_0123456789".as_bytes(),
    )
}

/// Fresh in-memory database, migrated and seeded with the fixture catalog.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .with_seed(true)
        .build()
        .await
}

/// Same as [`build_test_state`] without the catalog.
pub async fn build_empty_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .build()
        .await
}
