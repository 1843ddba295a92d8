use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task {0} not found")]
    NotFound(i32),

    #[error("{0}")]
    Validation(String),

    /// A stored or patched value could not be interpreted. Unlike
    /// `Validation`, this is the service's fault, not the caller's.
    #[error("{0}")]
    Parse(String),

    /// Opaque failure. The cause has already been logged.
    #[error("error on server")]
    Internal,

    #[error("database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("task {id} not found")),
            TaskError::Validation(message) => AppError::BadRequest(message),
            TaskError::Parse(message) => AppError::InternalServerError(message),
            // storage details never leak to clients
            TaskError::Internal | TaskError::Database(_) => {
                AppError::InternalServerError("error on server".to_string())
            }
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404() {
        let response = TaskError::NotFound(42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = TaskError::Validation("invalid completed flag".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = TaskError::Database("connection refused at 10.0.0.3".to_string());
        match AppError::from(err) {
            AppError::InternalServerError(message) => assert_eq!(message, "error on server"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
