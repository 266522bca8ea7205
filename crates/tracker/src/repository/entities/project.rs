//! Project database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Project};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub deadline: Option<Date>,
    pub status: String,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Project {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(|_| {
            DomainError::internal(format!(
                "project {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Project {
            id: model.id,
            name: model.name,
            description: model.description,
            deadline: model.deadline,
            status,
            manager_id: model.manager_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<Project> for ActiveModel {
    fn from(project: Project) -> Self {
        ActiveModel {
            id: Set(project.id),
            name: Set(project.name),
            description: Set(project.description),
            deadline: Set(project.deadline),
            status: Set(project.status.as_str().to_string()),
            manager_id: Set(project.manager_id),
            created_at: Set(project.created_at),
            updated_at: Set(project.updated_at),
        }
    }
}
