//! Repository layer for data access.
//!
//! Each repository is a trait so services can be tested against mocks.
//! [`SeaStore`] implements all of them over any SeaORM connection, which
//! lets the same code run on the pool or inside a transaction.

pub mod entities;
mod project_repository;
mod task_repository;
mod user_repository;

pub use project_repository::ProjectRepository;
pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

use sea_orm::ConnectionTrait;

/// SeaORM-backed store over a connection or transaction.
pub struct SeaStore<C> {
    conn: C,
}

impl<C: ConnectionTrait + Send + Sync> SeaStore<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &C {
        &self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }
}
