//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod health_handler;
pub mod project_handler;
pub mod task_handler;
pub mod user_handler;

pub use auth_handler::{auth_routes, registration_routes};
pub use dashboard_handler::dashboard_routes;
pub use health_handler::health_check;
pub use project_handler::project_routes;
pub use task_handler::task_routes;
pub use user_handler::user_routes;
