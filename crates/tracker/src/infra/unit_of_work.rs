//! Unit of Work pattern implementation.
//!
//! Every service operation opens one [`Transaction`], reaches all
//! repositories through it and finishes with [`settle`]: commit when the
//! operation succeeded, rollback otherwise. There is no ambient session;
//! the transaction is an explicit value handed to whoever needs it.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use common::AppResult;

use crate::repository::{ProjectRepository, SeaStore, TaskRepository, UserRepository};

/// Open transaction with repository access.
///
/// The trait is object safe so services can be exercised against an
/// in-memory double.
#[async_trait]
pub trait Transaction: Send + Sync {
    fn users(&self) -> &dyn UserRepository;

    fn projects(&self) -> &dyn ProjectRepository;

    fn tasks(&self) -> &dyn TaskRepository;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Transaction factory for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a new transaction.
    async fn begin(&self) -> AppResult<Box<dyn Transaction>>;
}

/// Commit on success, roll back on error.
///
/// A failed rollback is logged; the original error is what the caller sees.
pub async fn settle<T>(tx: Box<dyn Transaction>, outcome: AppResult<T>) -> AppResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaStore::new(txn)))
    }
}

#[async_trait]
impl Transaction for SeaStore<DatabaseTransaction> {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn projects(&self) -> &dyn ProjectRepository {
        self
    }

    fn tasks(&self) -> &dyn TaskRepository {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.into_inner().commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.into_inner().rollback().await?;
        Ok(())
    }
}
