use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted internally).
/// Handlers acquire a connection or open a transaction per request; nothing
/// else is shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stellar_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
