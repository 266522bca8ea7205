//! Task repository.
//!
//! Tasks are always reached through explicit queries by project or
//! assignee; nothing is loaded lazily through relations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Task;

use super::entities::task::{self, ActiveModel, Entity as TaskEntity};
use super::SeaStore;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>>;

    /// Tasks of one project
    async fn tasks_by_project(&self, project_id: Uuid) -> AppResult<Vec<Task>>;

    /// Tasks assigned to one user
    async fn tasks_by_assignee(&self, user_id: Uuid) -> AppResult<Vec<Task>>;

    /// Tasks of several projects in a single query
    async fn list_for_projects(&self, project_ids: Vec<Uuid>) -> AppResult<Vec<Task>>;

    async fn insert(&self, task: Task) -> AppResult<Task>;

    async fn update(&self, task: Task) -> AppResult<Task>;

    /// Delete by ID; `NotFound` when no row matched
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Delete every task of a project, returning how many were removed
    async fn delete_by_project(&self, project_id: Uuid) -> AppResult<u64>;
}

fn to_domain(model: task::Model) -> AppResult<Task> {
    Task::try_from(model).map_err(AppError::from)
}

fn all_to_domain(models: Vec<task::Model>) -> AppResult<Vec<Task>> {
    models.into_iter().map(to_domain).collect()
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> TaskRepository for SeaStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        TaskEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn tasks_by_project(&self, project_id: Uuid) -> AppResult<Vec<Task>> {
        let models = TaskEntity::find()
            .filter(task::Column::ProjectId.eq(project_id))
            .order_by_asc(task::Column::CreatedAt)
            .all(self.conn())
            .await?;
        all_to_domain(models)
    }

    async fn tasks_by_assignee(&self, user_id: Uuid) -> AppResult<Vec<Task>> {
        let models = TaskEntity::find()
            .filter(task::Column::AssigneeId.eq(user_id))
            .order_by_asc(task::Column::DueDate)
            .all(self.conn())
            .await?;
        all_to_domain(models)
    }

    async fn list_for_projects(&self, project_ids: Vec<Uuid>) -> AppResult<Vec<Task>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TaskEntity::find()
            .filter(task::Column::ProjectId.is_in(project_ids))
            .all(self.conn())
            .await?;
        all_to_domain(models)
    }

    async fn insert(&self, task: Task) -> AppResult<Task> {
        let model = ActiveModel::from(task).insert(self.conn()).await?;
        to_domain(model)
    }

    async fn update(&self, task: Task) -> AppResult<Task> {
        let model = ActiveModel::from(task).update(self.conn()).await?;
        to_domain(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = TaskEntity::delete_by_id(id).exec(self.conn()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Task"));
        }

        Ok(())
    }

    async fn delete_by_project(&self, project_id: Uuid) -> AppResult<u64> {
        let result = TaskEntity::delete_many()
            .filter(task::Column::ProjectId.eq(project_id))
            .exec(self.conn())
            .await?;

        Ok(result.rows_affected)
    }
}
