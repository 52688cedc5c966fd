//! Application state shared across all request handlers.

use crate::config::runtime::AdminConfig;
use crate::sessions::SessionStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: SqlitePool,
    /// Admin credential (can be reloaded via SIGHUP).
    pub admin: Arc<RwLock<AdminConfig>>,
    /// Token → identity map for logged-in callers.
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new AppState with the given database pool and admin config.
    pub fn new(db: SqlitePool, admin: AdminConfig) -> Self {
        Self {
            db,
            admin: Arc::new(RwLock::new(admin)),
            sessions: SessionStore::new(),
        }
    }
}
