use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::ws::hub::LiveQueryRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent only in tests that never touch storage)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    live: Arc<LiveQueryRegistry>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            live: Arc::new(LiveQueryRegistry::new()),
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            live: Arc::new(LiveQueryRegistry::new()),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Sessions subscribed to live queries on this node.
    pub fn live_queries(&self) -> Arc<LiveQueryRegistry> {
        Arc::clone(&self.live)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish()
    }
}
