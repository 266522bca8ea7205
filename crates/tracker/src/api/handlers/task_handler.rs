//! Task handlers, nested under `/projects/:id/tasks`.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Task, TaskForm};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;

/// Create or edit task request. Literals are parsed by the service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[schema(example = "Write release notes")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "2026-11-01")]
    pub due_date: Option<NaiveDate>,
    /// Defaults to `To Do`
    #[schema(example = "To Do")]
    pub status: Option<String>,
    /// Defaults to `Medium`
    #[schema(example = "High")]
    pub priority: Option<String>,
    pub assignee_id: Option<Uuid>,
}

impl From<TaskRequest> for TaskForm {
    fn from(request: TaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            status: request.status,
            priority: request.priority,
            assignee_id: request.assignee_id,
        }
    }
}

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:task_id", put(update_task).delete(delete_task))
}

/// List the tasks of a project
#[utoipa::path(
    get,
    path = "/projects/{id}/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Tasks of the project", body = Vec<Task>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_tasks(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state
        .task_service
        .list_tasks(&current_user.actor(), project_id)
        .await?;

    Ok(Json(tasks))
}

/// Create a task in a project
#[utoipa::path(
    post,
    path = "/projects/{id}/tasks",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn create_task(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = state
        .task_service
        .create_task(&current_user.actor(), project_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Edit a task
#[utoipa::path(
    put,
    path = "/projects/{id}/tasks/{task_id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Project or task not found")
    )
)]
pub async fn update_task(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(payload): ValidatedJson<TaskRequest>,
) -> AppResult<Json<Task>> {
    let task = state
        .task_service
        .update_task(&current_user.actor(), project_id, task_id, payload.into())
        .await?;

    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/projects/{id}/tasks/{task_id}",
    tag = "Tasks",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Project or task not found")
    )
)]
pub async fn delete_task(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .task_service
        .delete_task(&current_user.actor(), project_id, task_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
