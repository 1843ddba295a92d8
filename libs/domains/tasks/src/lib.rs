//! Tasks Domain
//!
//! CRUD and paginated listing for tasks backed by Postgres.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, pagination, error collapsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{
//!     handlers,
//!     repository::InMemoryTaskRepository,
//!     service::TaskService,
//! };
//!
//! let repository = InMemoryTaskRepository::new();
//! let service = TaskService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::{CreateTask, Task, TaskFilter, TaskPage, TaskPatch};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
