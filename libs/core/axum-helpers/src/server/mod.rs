//! Server infrastructure module.
//!
//! Provides router assembly with OpenAPI documentation, server startup,
//! and graceful shutdown coordination.

pub mod app;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use shutdown::shutdown_signal;
