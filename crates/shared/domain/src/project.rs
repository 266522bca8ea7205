//! Project domain entity.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{PROJECT_STATUS_ACTIVE, PROJECT_STATUS_COMPLETED, PROJECT_STATUS_ON_HOLD};
use crate::error::{DomainError, DomainResult};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => PROJECT_STATUS_ACTIVE,
            ProjectStatus::Completed => PROJECT_STATUS_COMPLETED,
            ProjectStatus::OnHold => PROJECT_STATUS_ON_HOLD,
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROJECT_STATUS_ACTIVE => Ok(ProjectStatus::Active),
            PROJECT_STATUS_COMPLETED => Ok(ProjectStatus::Completed),
            PROJECT_STATUS_ON_HOLD => Ok(ProjectStatus::OnHold),
            other => Err(DomainError::validation(format!(
                "Invalid project status '{}'. Must be one of: Active, Completed, On Hold",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project domain entity. Tasks reference it by `project_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: ProjectStatus,
    /// Assigned manager, set to the creator
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Build a new project from a validated draft.
    pub fn new(draft: ProjectDraft, manager_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            deadline: draft.deadline,
            status: draft.status,
            manager_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` is the assigned manager.
    pub fn is_managed_by(&self, user_id: Uuid) -> bool {
        self.manager_id == Some(user_id)
    }

    /// Replace the editable fields. The manager is left untouched.
    pub fn apply(&mut self, draft: ProjectDraft) {
        self.name = draft.name.trim().to_string();
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.status = draft.status;
        self.updated_at = Utc::now();
    }
}

/// Editable project fields, used for both creation and edits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl ProjectDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Project name is required"));
        }
        Ok(())
    }
}

/// Project fields as submitted, before literals are parsed.
///
/// Conversion happens only after the caller has been authorized, so a
/// malformed submission from someone without permission is still refused.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectForm {
    pub name: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
}

impl ProjectForm {
    /// Parse the status literal and validate the resulting draft.
    /// A missing or empty status means `Active`.
    pub fn into_draft(self) -> DomainResult<ProjectDraft> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => ProjectStatus::default(),
            Some(raw) => raw.parse()?,
        };
        let draft = ProjectDraft {
            name: self.name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            deadline: self.deadline,
            status,
        };
        draft.validate()?;
        Ok(draft)
    }
}
