//! Transaction double and fixtures for service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Actor, Password, Project, ProjectDraft, Task, TaskDraft, User, UserRole};

use crate::infra::{Transaction, UnitOfWork};
use crate::repository::{
    MockProjectRepository, MockTaskRepository, MockUserRepository, ProjectRepository,
    TaskRepository, UserRepository,
};

/// How a test transaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    RolledBack,
}

/// Transaction backed by mockall repositories.
#[derive(Default)]
pub struct TestTransaction {
    pub users: MockUserRepository,
    pub projects: MockProjectRepository,
    pub tasks: MockTaskRepository,
    outcome: Arc<Mutex<Option<Outcome>>>,
}

impl TestTransaction {
    fn finish(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap() = Some(outcome);
    }
}

#[async_trait]
impl Transaction for TestTransaction {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn projects(&self) -> &dyn ProjectRepository {
        &self.projects
    }

    fn tasks(&self) -> &dyn TaskRepository {
        &self.tasks
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.finish(Outcome::Committed);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.finish(Outcome::RolledBack);
        Ok(())
    }
}

/// Hands out a single prepared transaction.
pub struct TestUnitOfWork {
    tx: Mutex<Option<TestTransaction>>,
    outcome: Arc<Mutex<Option<Outcome>>>,
}

impl TestUnitOfWork {
    pub fn new(tx: TestTransaction) -> Arc<Self> {
        let outcome = tx.outcome.clone();
        Arc::new(Self {
            tx: Mutex::new(Some(tx)),
            outcome,
        })
    }

    /// `None` while the transaction is still open (or was never begun).
    pub fn outcome(&self) -> Option<Outcome> {
        *self.outcome.lock().unwrap()
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        let tx = self
            .tx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| AppError::internal("test transaction already used"))?;
        Ok(Box::new(tx))
    }
}

pub fn actor(role: UserRole) -> Actor {
    Actor::new(Uuid::new_v4(), role)
}

/// User with a placeholder hash; use `Password::new` where login matters.
pub fn user(username: &str, role: UserRole) -> User {
    User::new(
        username.to_string(),
        Password::from_hash("not-a-real-hash".to_string()),
        role,
    )
}

pub fn project(name: &str, manager_id: Option<Uuid>) -> Project {
    Project::new(
        ProjectDraft {
            name: name.to_string(),
            ..Default::default()
        },
        manager_id,
    )
}

pub fn task(project_id: Uuid, assignee_id: Option<Uuid>) -> Task {
    Task::new(
        TaskDraft {
            title: "Write release notes".to_string(),
            assignee_id,
            ..Default::default()
        },
        project_id,
    )
}
