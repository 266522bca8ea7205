//! User repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::User;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::SeaStore;

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List all users ordered by username
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Persist a new user
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> AppResult<User>;
}

fn to_domain(model: user::Model) -> AppResult<User> {
    User::try_from(model).map_err(AppError::from)
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> UserRepository for SeaStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(self.conn())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        UserEntity::find()
            .order_by_asc(user::Column::Username)
            .all(self.conn())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(user).insert(self.conn()).await?;
        to_domain(model)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(user).update(self.conn()).await?;
        to_domain(model)
    }
}
