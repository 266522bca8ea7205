//! Personal dashboard handler.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;

use common::AppResult;
use domain::AssignmentSummary;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Status counts and upcoming deadlines of the caller's assigned tasks
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignment summary", body = AssignmentSummary),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn dashboard(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AssignmentSummary>> {
    let summary = state
        .task_service
        .dashboard(&current_user.actor(), Utc::now().date_naive())
        .await?;

    Ok(Json(summary))
}
