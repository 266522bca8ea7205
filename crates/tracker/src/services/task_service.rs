//! Task service - tasks inside a project and the per-user dashboard.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    authorize, summarize_assignments, Actor, AssignmentSummary, Operation, Resource, Task,
    TaskDraft, TaskForm,
};

use crate::infra::{settle, Transaction, UnitOfWork};

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self, actor: &Actor, project_id: Uuid) -> AppResult<Vec<Task>>;

    async fn create_task(&self, actor: &Actor, project_id: Uuid, form: TaskForm)
        -> AppResult<Task>;

    async fn update_task(
        &self,
        actor: &Actor,
        project_id: Uuid,
        task_id: Uuid,
        form: TaskForm,
    ) -> AppResult<Task>;

    async fn delete_task(&self, actor: &Actor, project_id: Uuid, task_id: Uuid) -> AppResult<()>;

    /// Status counts and upcoming due dates of the actor's assigned tasks
    async fn dashboard(&self, actor: &Actor, today: NaiveDate) -> AppResult<AssignmentSummary>;
}

/// Load a task addressed through its project. A task that exists under a
/// different project is reported as missing.
async fn find_task_in(tx: &dyn Transaction, project_id: Uuid, task_id: Uuid) -> AppResult<Task> {
    tx.tasks()
        .find_by_id(task_id)
        .await?
        .filter(|task| task.project_id == project_id)
        .ok_or_not_found("Task")
}

async fn check_assignee(tx: &dyn Transaction, draft: &TaskDraft) -> AppResult<()> {
    if let Some(assignee_id) = draft.assignee_id {
        if tx.users().find_by_id(assignee_id).await?.is_none() {
            return Err(AppError::validation("Assignee does not exist"));
        }
    }
    Ok(())
}

pub struct TaskManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TaskManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TaskService for TaskManager<U> {
    async fn list_tasks(&self, actor: &Actor, project_id: Uuid) -> AppResult<Vec<Task>> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<Vec<Task>> = async {
            let project = tx
                .projects()
                .find_by_id(project_id)
                .await?
                .ok_or_not_found("Project")?;
            authorize(actor, Operation::View, Resource::Tasks(&project))?;
            tx.tasks().tasks_by_project(project.id).await
        }
        .await;
        settle(tx, outcome).await
    }

    async fn create_task(
        &self,
        actor: &Actor,
        project_id: Uuid,
        form: TaskForm,
    ) -> AppResult<Task> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<Task> = async {
            let project = tx
                .projects()
                .find_by_id(project_id)
                .await?
                .ok_or_not_found("Project")?;
            authorize(actor, Operation::Create, Resource::Tasks(&project))?;
            let draft = form.into_draft()?;
            check_assignee(tx.as_ref(), &draft).await?;

            tx.tasks().insert(Task::new(draft, project.id)).await
        }
        .await;
        let task = settle(tx, outcome).await?;

        tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
        Ok(task)
    }

    async fn update_task(
        &self,
        actor: &Actor,
        project_id: Uuid,
        task_id: Uuid,
        form: TaskForm,
    ) -> AppResult<Task> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<Task> = async {
            let mut task = find_task_in(tx.as_ref(), project_id, task_id).await?;
            authorize(actor, Operation::Edit, Resource::Task(&task))?;
            let draft = form.into_draft()?;
            check_assignee(tx.as_ref(), &draft).await?;

            task.apply(draft);
            tx.tasks().update(task).await
        }
        .await;
        let task = settle(tx, outcome).await?;

        tracing::info!(task_id = %task.id, status = %task.status, "Task updated");
        Ok(task)
    }

    async fn delete_task(&self, actor: &Actor, project_id: Uuid, task_id: Uuid) -> AppResult<()> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<()> = async {
            let task = find_task_in(tx.as_ref(), project_id, task_id).await?;
            authorize(actor, Operation::Delete, Resource::Task(&task))?;
            tx.tasks().delete(task.id).await
        }
        .await;
        settle(tx, outcome).await?;

        tracing::info!(task_id = %task_id, "Task deleted");
        Ok(())
    }

    async fn dashboard(&self, actor: &Actor, today: NaiveDate) -> AppResult<AssignmentSummary> {
        let tx = self.uow.begin().await?;
        let outcome = tx.tasks().tasks_by_assignee(actor.id).await;
        let tasks = settle(tx, outcome).await?;

        Ok(summarize_assignments(&tasks, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{
        actor, project, task, user, Outcome, TestTransaction, TestUnitOfWork,
    };
    use chrono::Duration;
    use domain::{TaskStatus, UserRole};
    use mockall::predicate::eq;

    fn form(title: &str, assignee_id: Option<Uuid>) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            assignee_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_manager_creates_task_in_project() {
        let p = project("Alpha Launch", None);
        let project_id = p.id;
        let assignee = user("bob", UserRole::Member);
        let assignee_id = assignee.id;

        let mut tx = TestTransaction::default();
        tx.projects
            .expect_find_by_id()
            .with(eq(project_id))
            .returning(move |_| Ok(Some(p.clone())));
        tx.users
            .expect_find_by_id()
            .with(eq(assignee_id))
            .returning(move |_| Ok(Some(assignee.clone())));
        tx.tasks
            .expect_insert()
            .withf(move |t| t.project_id == project_id && t.status == TaskStatus::ToDo)
            .returning(|t| Ok(t));
        let uow = TestUnitOfWork::new(tx);
        let service = TaskManager::new(uow.clone());

        let created = service
            .create_task(
                &actor(UserRole::Manager),
                project_id,
                form("Draft plan", Some(assignee_id)),
            )
            .await
            .unwrap();

        assert_eq!(created.assignee_id, Some(assignee_id));
        assert_eq!(uow.outcome(), Some(Outcome::Committed));
    }

    #[tokio::test]
    async fn test_member_cannot_create_task() {
        let p = project("Alpha Launch", None);
        let mut tx = TestTransaction::default();
        tx.projects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(p.clone())));
        tx.tasks.expect_insert().never();
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let result = service
            .create_task(&actor(UserRole::Member), Uuid::new_v4(), form("Sneaky", None))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_create_in_missing_project_is_not_found() {
        let mut tx = TestTransaction::default();
        tx.projects.expect_find_by_id().returning(|_| Ok(None));
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let result = service
            .create_task(&actor(UserRole::Admin), Uuid::new_v4(), form("Orphan", None))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_project_wins_over_blank_title() {
        let mut tx = TestTransaction::default();
        tx.projects.expect_find_by_id().returning(|_| Ok(None));
        tx.tasks.expect_insert().never();
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let result = service
            .create_task(&actor(UserRole::Admin), Uuid::new_v4(), form("", None))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_member_with_blank_title_is_forbidden() {
        let p = project("Alpha Launch", None);
        let mut tx = TestTransaction::default();
        tx.projects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(p.clone())));
        tx.tasks.expect_insert().never();
        let service = TaskManager::new(TestUnitOfWork::new(tx));
        let malformed = TaskForm {
            priority: Some("Urgent".to_string()),
            ..form("", None)
        };

        let result = service
            .create_task(&actor(UserRole::Member), Uuid::new_v4(), malformed)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_unknown_assignee_is_rejected() {
        let p = project("Alpha Launch", None);
        let mut tx = TestTransaction::default();
        tx.projects
            .expect_find_by_id()
            .returning(move |_| Ok(Some(p.clone())));
        tx.users.expect_find_by_id().returning(|_| Ok(None));
        tx.tasks.expect_insert().never();
        let uow = TestUnitOfWork::new(tx);
        let service = TaskManager::new(uow.clone());

        let result = service
            .create_task(
                &actor(UserRole::Admin),
                Uuid::new_v4(),
                form("Draft plan", Some(Uuid::new_v4())),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(uow.outcome(), Some(Outcome::RolledBack));
    }

    #[tokio::test]
    async fn test_assignee_updates_own_task() {
        let member = actor(UserRole::Member);
        let project_id = Uuid::new_v4();
        let existing = task(project_id, Some(member.id));
        let task_id = existing.id;

        let mut tx = TestTransaction::default();
        tx.tasks
            .expect_find_by_id()
            .with(eq(task_id))
            .returning(move |_| Ok(Some(existing.clone())));
        tx.users
            .expect_find_by_id()
            .with(eq(member.id))
            .returning(|id| {
                let mut assignee = user("bob", UserRole::Member);
                assignee.id = id;
                Ok(Some(assignee))
            });
        tx.tasks.expect_update().returning(|t| Ok(t));
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let mut changes = form("Write release notes", Some(member.id));
        changes.status = Some("Completed".to_string());
        let updated = service
            .update_task(&member, project_id, task_id, changes)
            .await
            .unwrap();

        assert!(updated.is_completed());
        assert_eq!(updated.project_id, project_id);
    }

    #[tokio::test]
    async fn test_other_member_cannot_update_task() {
        let project_id = Uuid::new_v4();
        let existing = task(project_id, Some(Uuid::new_v4()));
        let task_id = existing.id;

        let mut tx = TestTransaction::default();
        tx.tasks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        tx.tasks.expect_update().never();
        let uow = TestUnitOfWork::new(tx);
        let service = TaskManager::new(uow.clone());

        let result = service
            .update_task(&actor(UserRole::Member), project_id, task_id, form("Hijack", None))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert_eq!(uow.outcome(), Some(Outcome::RolledBack));
    }

    #[tokio::test]
    async fn test_task_under_wrong_project_is_not_found() {
        let existing = task(Uuid::new_v4(), None);
        let task_id = existing.id;

        let mut tx = TestTransaction::default();
        tx.tasks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        tx.tasks.expect_delete().never();
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let result = service
            .delete_task(&actor(UserRole::Admin), Uuid::new_v4(), task_id)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_manager_deletes_task() {
        let project_id = Uuid::new_v4();
        let existing = task(project_id, None);
        let task_id = existing.id;

        let mut tx = TestTransaction::default();
        tx.tasks
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        tx.tasks
            .expect_delete()
            .with(eq(task_id))
            .times(1)
            .returning(|_| Ok(()));
        let uow = TestUnitOfWork::new(tx);
        let service = TaskManager::new(uow.clone());

        service
            .delete_task(&actor(UserRole::Manager), project_id, task_id)
            .await
            .unwrap();

        assert_eq!(uow.outcome(), Some(Outcome::Committed));
    }

    #[tokio::test]
    async fn test_dashboard_summarizes_assigned_tasks() {
        let me = actor(UserRole::Member);
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let project_id = Uuid::new_v4();

        let mut soon = task(project_id, Some(me.id));
        soon.due_date = Some(today + Duration::days(3));
        let mut later = task(project_id, Some(me.id));
        later.due_date = Some(today + Duration::days(30));
        let mut finished = task(project_id, Some(me.id));
        finished.status = TaskStatus::Completed;
        let assigned = vec![soon, later, finished];

        let mut tx = TestTransaction::default();
        tx.tasks
            .expect_tasks_by_assignee()
            .with(eq(me.id))
            .returning(move |_| Ok(assigned.clone()));
        let service = TaskManager::new(TestUnitOfWork::new(tx));

        let summary = service.dashboard(&me, today).await.unwrap();

        assert_eq!(summary.counts.to_do, 2);
        assert_eq!(summary.counts.completed, 1);
        assert_eq!(summary.upcoming.len(), 1);
    }
}
