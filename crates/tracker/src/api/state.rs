//! Application state shared by all handlers.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};

use crate::infra::Database;
use crate::services::{AuthService, ProjectService, ServiceContainer, TaskService, UserService};

/// Backing-store liveness check used by `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[async_trait]
impl HealthProbe for Database {
    async fn ping(&self) -> AppResult<()> {
        Database::ping(self).await.map_err(AppError::from)
    }
}

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub project_service: Arc<dyn ProjectService>,
    pub task_service: Arc<dyn TaskService>,
    pub probe: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Build state from a service container and a health probe.
    pub fn from_services(services: &impl ServiceContainer, probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            project_service: services.projects(),
            task_service: services.tasks(),
            probe,
        }
    }
}
