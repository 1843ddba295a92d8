use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, TaskPage, TaskPatch};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// Page size when the client does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Page served when the client does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;

#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(schemas(Task, CreateTask, TaskPatch, TaskPage)),
    tags((name = "tasks", description = "Task management endpoints"))
)]
pub struct ApiDoc;

pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(shared_service)
}

fn parse_id(raw: &str) -> TaskResult<i32> {
    raw.parse()
        .map_err(|_| TaskError::Validation(format!("invalid task id: {raw}")))
}

/// Query parameters of the listing endpoint. Everything arrives as a
/// raw string so that malformed filters produce the right 4xx message
/// while malformed paging silently falls back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Filter by completion status ("true" or "false")
    completed: Option<String>,
    /// Filter by due date, YYYY-MM-DD
    date: Option<String>,
    /// Tasks per page, defaults to 10
    limit: Option<String>,
    /// Page number, defaults to 1
    page: Option<String>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "One page of tasks", body = TaskPage),
        (status = 400, description = "Invalid filter parameter"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(query): Query<ListTasksQuery>,
) -> TaskResult<Json<TaskPage>> {
    let completed = match query.completed.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<bool>()
                .map_err(|_| TaskError::Validation("invalid completed flag".to_string()))?,
        ),
        None => None,
    };
    let due_date = match query.date.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| TaskError::Validation("invalid date format".to_string()))?,
        ),
        None => None,
    };

    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_LIMIT);
    let page = query
        .page
        .as_deref()
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(DEFAULT_PAGE);

    let tasks = service
        .list_tasks(TaskFilter { completed, due_date }, limit, page)
        .await?;
    Ok(Json(tasks))
}

#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> TaskResult<impl IntoResponse> {
    let Json(input) = payload.map_err(|rejection| TaskError::Validation(rejection.body_text()))?;
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(raw_id): Path<String>,
) -> TaskResult<Json<Task>> {
    let id = parse_id(&raw_id)?;
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task identifier")),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "The updated task", body = Task),
        (status = 400, description = "Invalid task id or payload"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> TaskResult<Json<Task>> {
    let id = parse_id(&raw_id)?;
    // existence check first, so an unknown id is a 404 even when the
    // body is broken too
    let mut task = service.get_task(id).await?;
    let Json(patch) = payload.map_err(|rejection| TaskError::Validation(rejection.body_text()))?;
    task.apply_patch(patch)
        .map_err(|err| TaskError::Parse(err.to_string()))?;
    let updated = service.update_task(task).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(("id" = i32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(raw_id): Path<String>,
) -> TaskResult<StatusCode> {
    let id = parse_id(&raw_id)?;
    service.get_task(id).await?;
    service.delete_task(id).await?;
    Ok(StatusCode::OK)
}
