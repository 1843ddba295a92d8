//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tasks API",
        version = "0.1.0",
        description = "REST API for managing tasks with filtering and pagination",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc)
    ),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;
