use std::sync::Arc;

use crate::auth::directory::Directory;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: questlearn_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential directory consulted on login.
    pub directory: Arc<dyn Directory>,
}
