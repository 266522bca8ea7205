//! Per-user summary of assigned work.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::constants::UPCOMING_WINDOW_DAYS;
use crate::task::{Task, TaskStatus};

/// Number of tasks in each workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::ToDo => self.to_do += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }
}

/// Status counts plus the tasks due soon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignmentSummary {
    pub counts: StatusCounts,
    /// Tasks due in [today, today + 7 days], earliest first
    pub upcoming: Vec<Task>,
}

/// Summarize a user's assigned tasks relative to `today`.
pub fn summarize_assignments(tasks: &[Task], today: NaiveDate) -> AssignmentSummary {
    let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut counts = StatusCounts::default();
    let mut upcoming = Vec::new();

    for task in tasks {
        counts.record(task.status);
        if task
            .due_date
            .is_some_and(|due| today <= due && due <= horizon)
        {
            upcoming.push(task.clone());
        }
    }
    upcoming.sort_by_key(|task| task.due_date);

    AssignmentSummary { counts, upcoming }
}
