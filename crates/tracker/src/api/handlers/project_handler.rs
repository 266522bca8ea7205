//! Project handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Project, ProjectFilter, ProjectForm};

use crate::api::extractors::ValidatedJson;
use crate::api::handlers::task_handler::task_routes;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::services::{ProjectDetail, ProjectSummary};

/// Project listing filters. Empty values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// Case-insensitive substring of the project name
    pub search: Option<String>,
    /// `Active`, `Completed` or `On Hold`
    pub status: Option<String>,
    /// `this_week`, `this_month` or `within_1_year`
    pub deadline: Option<String>,
}

/// Create or edit project request.
///
/// Fields are checked by the service once the caller is authorized.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProjectRequest {
    #[schema(example = "Website relaunch")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "2026-12-31")]
    pub deadline: Option<NaiveDate>,
    /// Defaults to `Active`
    #[schema(example = "Active")]
    pub status: Option<String>,
}

impl From<ProjectRequest> for ProjectForm {
    fn from(request: ProjectRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            deadline: request.deadline,
            status: request.status,
        }
    }
}

/// Create project routes, with the task routes nested per project
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .nest("/:id/tasks", task_routes())
}

/// List projects matching the filters, with progress
#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(ProjectQuery),
    responses(
        (status = 200, description = "Matching projects", body = Vec<ProjectSummary>),
        (status = 400, description = "Unknown status or deadline window"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_projects(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<Vec<ProjectSummary>>> {
    let filter = ProjectFilter::parse(
        query.search.as_deref(),
        query.status.as_deref(),
        query.deadline.as_deref(),
    )?;
    let today = Utc::now().date_naive();

    let projects = state
        .project_service
        .list_projects(&current_user.actor(), filter, today)
        .await?;

    Ok(Json(projects))
}

/// Get a project with its tasks and progress
#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project found", body = ProjectDetail),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectDetail>> {
    let project = state
        .project_service
        .get_project(&current_user.actor(), id)
        .await?;

    Ok(Json(project))
}

/// Create a project; the creator becomes its manager
#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    security(("bearer_auth" = [])),
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied")
    )
)]
pub async fn create_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state
        .project_service
        .create_project(&current_user.actor(), payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Edit a project
#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ProjectRequest>,
) -> AppResult<Json<Project>> {
    let project = state
        .project_service
        .update_project(&current_user.actor(), id, payload.into())
        .await?;

    Ok(Json(project))
}

/// Delete a project and all of its tasks
#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "Projects",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission denied"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .project_service
        .delete_project(&current_user.actor(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
