//! Project repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::Project;

use super::entities::project::{self, ActiveModel, Entity as ProjectEntity};
use super::SeaStore;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>>;

    /// All projects, oldest first
    async fn list(&self) -> AppResult<Vec<Project>>;

    async fn insert(&self, project: Project) -> AppResult<Project>;

    async fn update(&self, project: Project) -> AppResult<Project>;

    /// Delete by ID; `NotFound` when no row matched
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn to_domain(model: project::Model) -> AppResult<Project> {
    Project::try_from(model).map_err(AppError::from)
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> ProjectRepository for SeaStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        ProjectEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<Project>> {
        ProjectEntity::find()
            .order_by_asc(project::Column::CreatedAt)
            .all(self.conn())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn insert(&self, project: Project) -> AppResult<Project> {
        let model = ActiveModel::from(project).insert(self.conn()).await?;
        to_domain(model)
    }

    async fn update(&self, project: Project) -> AppResult<Project> {
        let model = ActiveModel::from(project).update(self.conn()).await?;
        to_domain(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = ProjectEntity::delete_by_id(id).exec(self.conn()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Project"));
        }

        Ok(())
    }
}
