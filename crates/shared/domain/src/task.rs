//! Task domain entity.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, TASK_STATUS_COMPLETED, TASK_STATUS_IN_PROGRESS,
    TASK_STATUS_TO_DO,
};
use crate::error::{DomainError, DomainResult};

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => TASK_STATUS_TO_DO,
            TaskStatus::InProgress => TASK_STATUS_IN_PROGRESS,
            TaskStatus::Completed => TASK_STATUS_COMPLETED,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TASK_STATUS_TO_DO => Ok(TaskStatus::ToDo),
            TASK_STATUS_IN_PROGRESS => Ok(TaskStatus::InProgress),
            TASK_STATUS_COMPLETED => Ok(TaskStatus::Completed),
            other => Err(DomainError::validation(format!(
                "Invalid task status '{}'. Must be one of: To Do, In Progress, Completed",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => PRIORITY_LOW,
            TaskPriority::Medium => PRIORITY_MEDIUM,
            TaskPriority::High => PRIORITY_HIGH,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIORITY_LOW => Ok(TaskPriority::Low),
            PRIORITY_MEDIUM => Ok(TaskPriority::Medium),
            PRIORITY_HIGH => Ok(TaskPriority::High),
            other => Err(DomainError::validation(format!(
                "Invalid priority '{}'. Must be one of: Low, Medium, High",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task domain entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new task inside `project_id` from a validated draft.
    pub fn new(draft: TaskDraft, project_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status,
            priority: draft.priority,
            project_id,
            assignee_id: draft.assignee_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assignee_id == Some(user_id)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Replace the editable fields. The owning project never changes.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title.trim().to_string();
        self.description = draft.description;
        self.due_date = draft.due_date;
        self.status = draft.status;
        self.priority = draft.priority;
        self.assignee_id = draft.assignee_id;
        self.updated_at = Utc::now();
    }
}

/// Editable task fields, used for both creation and edits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    pub assignee_id: Option<Uuid>,
}

impl TaskDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Task title is required"));
        }
        Ok(())
    }
}

/// Task fields as submitted, before literals are parsed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<Uuid>,
}

fn parse_or_default<T>(raw: Option<&str>) -> DomainResult<T>
where
    T: FromStr<Err = DomainError> + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse(),
    }
}

impl TaskForm {
    /// Parse the status and priority literals and validate the resulting draft.
    pub fn into_draft(self) -> DomainResult<TaskDraft> {
        let draft = TaskDraft {
            status: parse_or_default(self.status.as_deref())?,
            priority: parse_or_default(self.priority.as_deref())?,
            title: self.title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            due_date: self.due_date,
            assignee_id: self.assignee_id,
        };
        draft.validate()?;
        Ok(draft)
    }
}
