use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, bootstrap_url};
use crate::infra::seed::seed_catalog;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum DbTarget {
    Env(DbKind),
    Url(DbKind, String),
}

/// Builds `AppState` for both the server binary and tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: Option<DbTarget>,
    seed: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: None,
            seed: false,
        }
    }

    /// Connect using the environment-derived URL for `kind`.
    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db = Some(DbTarget::Env(kind));
        self
    }

    pub fn with_db_url(mut self, kind: DbKind, url: impl Into<String>) -> Self {
        self.db = Some(DbTarget::Url(kind, url.into()));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Load the fixture catalog after migrations (no-op if cards exist).
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = match self.db {
            None => return Ok(AppState::new_without_db(self.security_config)),
            Some(DbTarget::Env(kind)) => bootstrap_db(kind).await?,
            Some(DbTarget::Url(kind, url)) => bootstrap_url(kind, &url).await?,
        };

        if self.seed {
            seed_catalog(&conn).await?;
        }

        Ok(AppState::new(conn, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
