//! User domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MIN_NAME_LENGTH, MIN_USERNAME_LENGTH, ROLE_ADMIN, ROLE_MANAGER, ROLE_MEMBER};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;

/// User roles enumeration. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    Admin,
    Manager,
    Member,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Admins and managers coordinate projects and tasks they do not own.
    pub fn coordinates_work(&self) -> bool {
        match self {
            UserRole::Admin | UserRole::Manager => true,
            UserRole::Member => false,
        }
    }

    /// Canonical storage literal
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Manager => ROLE_MANAGER,
            UserRole::Member => ROLE_MEMBER,
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_MANAGER => Ok(UserRole::Manager),
            ROLE_MEMBER => Ok(UserRole::Member),
            other => Err(DomainError::validation(format!(
                "Invalid role '{}'. Must be one of: admin, manager, member",
                other
            ))),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id.
    pub fn new(username: String, password: Password, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash: password.into_string(),
            role,
            name: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Verify a login attempt against the stored hash.
    pub fn check_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone()).verify(plain_text)
    }

    /// Replace the stored hash.
    pub fn set_password(&mut self, password: Password) {
        self.password_hash = password.into_string();
        self.updated_at = Utc::now();
    }

    /// Apply self-service profile changes. The password, when present,
    /// must already be hashed by the caller.
    pub fn apply_profile(&mut self, name: String, email: String, password: Option<Password>) {
        self.name = Some(name);
        self.email = Some(email);
        self.updated_at = Utc::now();
        if let Some(password) = password {
            self.set_password(password);
        }
    }
}

/// Registration data for a new user, created by an admin.
///
/// The role stays a raw literal until the registration is authorized.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

impl NewUser {
    /// Check the username and password confirmation, then parse the role
    /// literal. Password strength is enforced when the [`Password`] is built.
    pub fn validate(&self) -> DomainResult<UserRole> {
        validate_username(&self.username)?;
        if self.password != self.confirm_password {
            return Err(DomainError::validation("Passwords must match"));
        }
        self.role.parse()
    }
}

/// Self-service profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileChanges {
    pub name: String,
    pub email: String,
    /// New password, left unchanged when absent
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ProfileChanges {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().chars().count() < MIN_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Name must be at least {} characters",
                MIN_NAME_LENGTH
            )));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        if let Some(password) = &self.password {
            if self.confirm_password.as_deref() != Some(password.as_str()) {
                return Err(DomainError::validation("Passwords must match"));
            }
        }
        Ok(())
    }
}

/// Usernames are unique, trimmed and at least [`MIN_USERNAME_LENGTH`] long.
pub fn validate_username(username: &str) -> DomainResult<()> {
    if username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Username must be at least {} characters",
            MIN_USERNAME_LENGTH
        )));
    }
    Ok(())
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// User role
    pub role: UserRole,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}
