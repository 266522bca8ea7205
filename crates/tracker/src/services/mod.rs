//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and persistence. Each operation runs
//! inside a single transaction obtained from the Unit of Work.

mod auth_service;
pub mod container;
mod project_service;
mod task_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use project_service::{ProjectDetail, ProjectManager, ProjectService, ProjectSummary};
pub use task_service::{TaskManager, TaskService};
pub use user_service::{UserManager, UserService};
