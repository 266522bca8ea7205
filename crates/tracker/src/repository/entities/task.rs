//! Task database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DomainError, Task};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub status: String,
    pub priority: String,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Task {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, value: &str| {
            DomainError::internal(format!("task {} has unknown {} '{}'", model.id, field, value))
        };
        let status = model
            .status
            .parse()
            .map_err(|_| corrupt("status", &model.status))?;
        let priority = model
            .priority
            .parse()
            .map_err(|_| corrupt("priority", &model.priority))?;

        Ok(Task {
            id: model.id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            status,
            priority,
            project_id: model.project_id,
            assignee_id: model.assignee_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            due_date: Set(task.due_date),
            status: Set(task.status.as_str().to_string()),
            priority: Set(task.priority.as_str().to_string()),
            project_id: Set(task.project_id),
            assignee_id: Set(task.assignee_id),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}
