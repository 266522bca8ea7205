//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role with full control over users, projects and tasks
pub const ROLE_ADMIN: &str = "admin";

/// Manager role that coordinates projects and tasks
pub const ROLE_MANAGER: &str = "manager";

/// Team member role, works on assigned tasks
pub const ROLE_MEMBER: &str = "member";

// =============================================================================
// Project & Task Literals
// =============================================================================

pub const PROJECT_STATUS_ACTIVE: &str = "Active";
pub const PROJECT_STATUS_COMPLETED: &str = "Completed";
pub const PROJECT_STATUS_ON_HOLD: &str = "On Hold";

pub const TASK_STATUS_TO_DO: &str = "To Do";
pub const TASK_STATUS_IN_PROGRESS: &str = "In Progress";
pub const TASK_STATUS_COMPLETED: &str = "Completed";

pub const PRIORITY_LOW: &str = "Low";
pub const PRIORITY_MEDIUM: &str = "Medium";
pub const PRIORITY_HIGH: &str = "High";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum username length requirement
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum display name length requirement
pub const MIN_NAME_LENGTH: usize = 3;

// =============================================================================
// Scheduling
// =============================================================================

/// Days ahead (inclusive) that count as "upcoming" on the dashboard
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Upper bound of the `within_1_year` deadline window, in days from today
pub const YEAR_WINDOW_DAYS: i64 = 365;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
