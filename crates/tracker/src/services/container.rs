//! Service Container - Centralized service access.

use std::sync::Arc;

use common::JwtConfig;

use super::{
    AuthService, Authenticator, ProjectManager, ProjectService, TaskManager, TaskService,
    UserManager, UserService,
};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn projects(&self) -> Arc<dyn ProjectService>;

    fn tasks(&self) -> Arc<dyn TaskService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    project_service: Arc<dyn ProjectService>,
    task_service: Arc<dyn TaskService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        project_service: Arc<dyn ProjectService>,
        task_service: Arc<dyn TaskService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            project_service,
            task_service,
        }
    }

    /// Wire every service over one shared Unit of Work.
    pub fn from_connection(db: sea_orm::DatabaseConnection, jwt: JwtConfig) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), jwt)),
            Arc::new(UserManager::new(uow.clone())),
            Arc::new(ProjectManager::new(uow.clone())),
            Arc::new(TaskManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn projects(&self) -> Arc<dyn ProjectService> {
        self.project_service.clone()
    }

    fn tasks(&self) -> Arc<dyn TaskService> {
        self.task_service.clone()
    }
}
