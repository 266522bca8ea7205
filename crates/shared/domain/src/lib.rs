//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users and roles, projects and tasks, the authorization policy, progress
//! aggregation and project filtering.

pub mod constants;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod password;
pub mod policy;
pub mod progress;
pub mod project;
pub mod task;
pub mod user;

pub use constants::*;
pub use dashboard::{summarize_assignments, AssignmentSummary, StatusCounts};
pub use error::{DomainError, DomainResult};
pub use filter::{filter_projects, DeadlineWindow, ProjectFilter};
pub use password::Password;
pub use policy::{authorize, can, Actor, Operation, Resource};
pub use progress::project_progress;
pub use project::{Project, ProjectDraft, ProjectForm, ProjectStatus};
pub use task::{Task, TaskDraft, TaskForm, TaskPriority, TaskStatus};
pub use user::{validate_username, NewUser, ProfileChanges, User, UserResponse, UserRole};
