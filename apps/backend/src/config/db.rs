use std::env;
use std::str::FromStr;

use super::must_var;
use crate::error::AppError;

/// Which database backs the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// SQLite database on disk (`SQLITE_FILE`)
    SqliteFile,
    /// Private SQLite database that lives as long as the pool
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite-file" | "sqlite_file" => Ok(Self::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(AppError::config(format!(
                "DB_PROFILE must be one of postgres, sqlite-file, sqlite-memory; got '{other}'"
            ))),
        }
    }
}

impl DbKind {
    /// `DB_PROFILE`, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DB_PROFILE") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(Self::Postgres),
        }
    }

    pub fn engine(self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::SqliteFile | Self::SqliteMemory => "sqlite",
        }
    }
}

/// Connection URL for the given kind, assembled from environment variables.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("PROD_DB")?;
            let user = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{user}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var("SQLITE_FILE")?;
            Ok(sqlite_file_url(&path))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// URL for a SQLite file, created on first connect.
pub fn sqlite_file_url(path: &str) -> String {
    format!("sqlite://{path}?mode=rwc")
}

/// Connection URL with the password masked, for logs.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((creds, host)) => {
            let user = creds.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}
