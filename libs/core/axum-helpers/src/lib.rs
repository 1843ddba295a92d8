//! # Axum Helpers
//!
//! Utilities shared by Axum-based services in this workspace.
//!
//! ## Modules
//!
//! - **[`errors`]**: application error type mapped to plain-text HTTP responses
//! - **[`server`]**: router assembly with OpenAPI docs, startup, graceful shutdown

pub mod errors;
pub mod server;

pub use errors::AppError;
pub use server::{create_app, create_router, shutdown_signal};
