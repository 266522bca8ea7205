//! Project service - listing with filters and progress, detail, CRUD.
//!
//! Every operation loads what it needs first (missing records are
//! `NotFound`), then consults the policy (`Forbidden`), then parses and
//! validates the submitted form, and only then writes. Deleting a project removes its tasks in
//! the same transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{
    authorize, filter_projects, project_progress, Actor, Operation, Project, ProjectFilter,
    ProjectForm, Resource, Task,
};

use crate::infra::{settle, UnitOfWork};

/// A project with its completion percentage.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectSummary {
    pub project: Project,
    /// Completed tasks in percent, rounded down
    #[schema(example = 75)]
    pub progress: u8,
}

/// A project with its tasks and completion percentage.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectDetail {
    pub project: Project,
    pub tasks: Vec<Task>,
    #[schema(example = 75)]
    pub progress: u8,
}

#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Projects matching `filter`, each with its progress
    async fn list_projects(
        &self,
        actor: &Actor,
        filter: ProjectFilter,
        today: NaiveDate,
    ) -> AppResult<Vec<ProjectSummary>>;

    async fn get_project(&self, actor: &Actor, id: Uuid) -> AppResult<ProjectDetail>;

    /// Create a project managed by the actor
    async fn create_project(&self, actor: &Actor, form: ProjectForm) -> AppResult<Project>;

    async fn update_project(&self, actor: &Actor, id: Uuid, form: ProjectForm)
        -> AppResult<Project>;

    /// Delete a project together with all of its tasks
    async fn delete_project(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

pub struct ProjectManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProjectManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProjectService for ProjectManager<U> {
    async fn list_projects(
        &self,
        actor: &Actor,
        filter: ProjectFilter,
        today: NaiveDate,
    ) -> AppResult<Vec<ProjectSummary>> {
        authorize(actor, Operation::View, Resource::Projects)?;

        let tx = self.uow.begin().await?;
        let outcome: AppResult<(Vec<Project>, Vec<Task>)> = async {
            let projects = filter_projects(tx.projects().list().await?, &filter, today);
            let ids = projects.iter().map(|p| p.id).collect();
            let tasks = tx.tasks().list_for_projects(ids).await?;
            Ok((projects, tasks))
        }
        .await;
        let (projects, tasks) = settle(tx, outcome).await?;

        let mut by_project: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in tasks {
            by_project.entry(task.project_id).or_default().push(task);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let tasks = by_project.get(&project.id).map_or(&[][..], Vec::as_slice);
                let progress = project_progress(&project, tasks);
                ProjectSummary { project, progress }
            })
            .collect())
    }

    async fn get_project(&self, actor: &Actor, id: Uuid) -> AppResult<ProjectDetail> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<ProjectDetail> = async {
            let project = tx.projects().find_by_id(id).await?.ok_or_not_found("Project")?;
            authorize(actor, Operation::View, Resource::Project(&project))?;

            let tasks = tx.tasks().tasks_by_project(project.id).await?;
            let progress = project_progress(&project, &tasks);
            Ok(ProjectDetail {
                project,
                tasks,
                progress,
            })
        }
        .await;
        settle(tx, outcome).await
    }

    async fn create_project(&self, actor: &Actor, form: ProjectForm) -> AppResult<Project> {
        authorize(actor, Operation::Create, Resource::Projects)?;
        let draft = form.into_draft()?;

        let tx = self.uow.begin().await?;
        let outcome = tx
            .projects()
            .insert(Project::new(draft, Some(actor.id)))
            .await;
        let project = settle(tx, outcome).await?;

        tracing::info!(project_id = %project.id, manager_id = %actor.id, "Project created");
        Ok(project)
    }

    async fn update_project(
        &self,
        actor: &Actor,
        id: Uuid,
        form: ProjectForm,
    ) -> AppResult<Project> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<Project> = async {
            let mut project = tx.projects().find_by_id(id).await?.ok_or_not_found("Project")?;
            authorize(actor, Operation::Edit, Resource::Project(&project))?;

            project.apply(form.into_draft()?);
            tx.projects().update(project).await
        }
        .await;
        let project = settle(tx, outcome).await?;

        tracing::info!(project_id = %project.id, "Project updated");
        Ok(project)
    }

    async fn delete_project(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<u64> = async {
            let project = tx.projects().find_by_id(id).await?.ok_or_not_found("Project")?;
            authorize(actor, Operation::Delete, Resource::Project(&project))?;

            let removed = tx.tasks().delete_by_project(project.id).await?;
            tx.projects().delete(project.id).await?;
            Ok(removed)
        }
        .await;
        let removed_tasks = settle(tx, outcome).await?;

        tracing::info!(project_id = %id, removed_tasks, "Project deleted");
        Ok(())
    }
}
