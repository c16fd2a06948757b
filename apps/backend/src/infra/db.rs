use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{db_url, sanitize_db_url, DbKind};
use crate::error::AppError;

/// Connect without touching the schema.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    connect_url(kind, &url).await
}

/// Connect to an explicit URL using the pool settings for `kind`.
pub async fn connect_url(kind: DbKind, url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.sqlx_logging(false)
        .acquire_timeout(Duration::from_secs(5));

    match kind {
        DbKind::Postgres => {
            opts.max_connections(16).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4).min_connections(1);
        }
        // The in-memory database disappears with its last connection.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
    }

    let conn = Database::connect(opts).await.map_err(|e| {
        warn!(engine = kind.engine(), url = %sanitize_db_url(url), error = %e, "Database connection failed");
        AppError::from(e)
    })?;

    if kind != DbKind::Postgres {
        conn.execute(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys = ON;",
        ))
        .await?;
    }

    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    bootstrap_url(kind, &url).await
}

pub async fn bootstrap_url(kind: DbKind, url: &str) -> Result<DatabaseConnection, AppError> {
    let started = Instant::now();
    let conn = connect_url(kind, url).await?;

    migrate(&conn, MigrationCommand::Up).await?;

    info!(
        engine = kind.engine(),
        url = %sanitize_db_url(url),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Database ready"
    );
    Ok(conn)
}
