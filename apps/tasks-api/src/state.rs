//! Application state management.
//!
//! The shared state passed to request handlers that need more than the
//! domain service, such as the readiness probe.

use database::postgres::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection handle shares the underlying pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Postgres connection pool
    pub db: DatabaseConnection,
}
