//! Health check endpoints

use axum::http::StatusCode;
use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    postgres: bool,
}

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Liveness check - the process is up and serving requests
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

/// Readiness check - verifies the Postgres connection
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres_healthy = database::postgres::check_health(&state.db).await.is_ok();

    let status = if postgres_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if postgres_healthy {
                "ready"
            } else {
                "unhealthy"
            }
            .to_string(),
            postgres: postgres_healthy,
        }),
    )
}
