//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use domain::{
    AssignmentSummary, Project, ProjectStatus, StatusCounts, Task, TaskPriority, TaskStatus,
    UserResponse, UserRole,
};

use crate::api::handlers::{
    auth_handler, dashboard_handler, health_handler, project_handler, task_handler, user_handler,
};
use crate::services::{ProjectDetail, ProjectSummary, TokenResponse};

/// OpenAPI documentation for the project tracker
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Project Tracker",
        version = "0.1.0",
        description = "Projects, tasks and assignments with role-based permissions",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health_check,
        // Authentication endpoints
        auth_handler::login,
        auth_handler::register,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::update_profile,
        // Project endpoints
        project_handler::list_projects,
        project_handler::get_project,
        project_handler::create_project,
        project_handler::update_project,
        project_handler::delete_project,
        // Task endpoints
        task_handler::list_tasks,
        task_handler::create_task,
        task_handler::update_task,
        task_handler::delete_task,
        dashboard_handler::dashboard,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Project,
            ProjectStatus,
            Task,
            TaskStatus,
            TaskPriority,
            StatusCounts,
            AssignmentSummary,
            // Service types
            TokenResponse,
            ProjectSummary,
            ProjectDetail,
            // Request and response types
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
            auth_handler::LoginRequest,
            auth_handler::RegisterRequest,
            user_handler::UpdateProfileRequest,
            project_handler::ProjectRequest,
            task_handler::TaskRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Login and admin registration"),
        (name = "Users", description = "User directory and own profile"),
        (name = "Projects", description = "Project management and progress"),
        (name = "Tasks", description = "Tasks within a project"),
        (name = "Dashboard", description = "Personal assignment summary")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/auth/login",
            "/auth/register",
            "/users",
            "/users/me",
            "/projects",
            "/projects/{id}",
            "/projects/{id}/tasks",
            "/projects/{id}/tasks/{task_id}",
            "/dashboard",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }
}
