use std::sync::Arc;

use crate::auth::identity::IdentityProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: relief_db::DbPool,
    /// Server configuration (JWT settings, CORS origins, timeouts).
    pub config: Arc<ServerConfig>,
    /// Identity provider used by mobile login. Swappable via the trait so
    /// tests and production inject different implementations.
    pub identity: Arc<dyn IdentityProvider>,
}
