//! Project progress aggregation.

use crate::project::Project;
use crate::task::Task;

/// Percentage (0..=100, rounded down) of the project's tasks that are
/// completed. Tasks belonging to other projects are ignored; a project
/// without tasks is at 0.
pub fn project_progress(project: &Project, tasks: &[Task]) -> u8 {
    let (total, completed) = tasks
        .iter()
        .filter(|task| task.project_id == project.id)
        .fold((0usize, 0usize), |(total, completed), task| {
            (total + 1, completed + usize::from(task.is_completed()))
        });

    if total == 0 {
        return 0;
    }

    // completed <= total, so the quotient is at most 100
    (completed * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDraft;
    use crate::task::{TaskDraft, TaskStatus};
    use uuid::Uuid;

    fn project() -> Project {
        Project::new(
            ProjectDraft {
                name: "Alpha Launch".to_string(),
                ..Default::default()
            },
            None,
        )
    }

    fn task(project_id: Uuid, status: TaskStatus) -> Task {
        Task::new(
            TaskDraft {
                title: "task".to_string(),
                status,
                ..Default::default()
            },
            project_id,
        )
    }

    #[test]
    fn test_no_tasks_is_zero() {
        assert_eq!(project_progress(&project(), &[]), 0);
    }

    #[test]
    fn test_three_of_four_completed() {
        let p = project();
        let tasks = vec![
            task(p.id, TaskStatus::Completed),
            task(p.id, TaskStatus::Completed),
            task(p.id, TaskStatus::Completed),
            task(p.id, TaskStatus::InProgress),
        ];
        assert_eq!(project_progress(&p, &tasks), 75);
    }

    #[test]
    fn test_rounds_down() {
        let p = project();
        let tasks = vec![
            task(p.id, TaskStatus::Completed),
            task(p.id, TaskStatus::ToDo),
            task(p.id, TaskStatus::ToDo),
        ];
        assert_eq!(project_progress(&p, &tasks), 33);
    }

    #[test]
    fn test_all_completed_is_hundred() {
        let p = project();
        let tasks = vec![task(p.id, TaskStatus::Completed), task(p.id, TaskStatus::Completed)];
        assert_eq!(project_progress(&p, &tasks), 100);
    }

    #[test]
    fn test_ignores_other_projects_tasks() {
        let p = project();
        let tasks = vec![
            task(p.id, TaskStatus::ToDo),
            task(Uuid::new_v4(), TaskStatus::Completed),
        ];
        assert_eq!(project_progress(&p, &tasks), 0);
    }
}
