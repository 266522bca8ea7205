//! User service - directory and self-service profile updates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{authorize, Actor, Operation, Password, ProfileChanges, Resource, User};

use crate::infra::{settle, UnitOfWork};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users (directory used to pick assignees)
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update the acting user's own profile
    async fn update_profile(&self, actor: &Actor, changes: ProfileChanges) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        let tx = self.uow.begin().await?;
        let outcome = tx.users().find_by_id(id).await;
        settle(tx, outcome).await?.ok_or_not_found("User")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let tx = self.uow.begin().await?;
        let outcome = tx.users().list().await;
        settle(tx, outcome).await
    }

    async fn update_profile(&self, actor: &Actor, changes: ProfileChanges) -> AppResult<User> {
        let tx = self.uow.begin().await?;
        let outcome: AppResult<User> = async {
            let mut user = tx.users().find_by_id(actor.id).await?.ok_or_not_found("User")?;
            authorize(actor, Operation::Edit, Resource::User(&user))?;
            changes.validate()?;

            let password = changes.password.as_deref().map(Password::new).transpose()?;
            user.apply_profile(
                changes.name.trim().to_string(),
                changes.email.trim().to_string(),
                password,
            );

            let user = tx.users().update(user).await?;
            tracing::info!(user_id = %user.id, "Profile updated");
            Ok(user)
        }
        .await;
        settle(tx, outcome).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{actor, user, Outcome, TestTransaction, TestUnitOfWork};
    use common::AppError;
    use domain::UserRole;

    fn changes(password: Option<&str>, confirm: Option<&str>) -> ProfileChanges {
        ProfileChanges {
            name: "Alice Liddell".to_string(),
            email: "alice@example.com".to_string(),
            password: password.map(String::from),
            confirm_password: confirm.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_id().returning(|_| Ok(None));
        let service = UserManager::new(TestUnitOfWork::new(tx));

        let result = service.get_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_own_profile_with_new_password() {
        let me = user("alice", UserRole::Member);
        let acting = Actor::from(&me);
        let mut tx = TestTransaction::default();
        tx.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(me.clone())));
        tx.users
            .expect_update()
            .withf(|u| u.name.as_deref() == Some("Alice Liddell") && u.check_password("newpass"))
            .returning(|u| Ok(u));
        let uow = TestUnitOfWork::new(tx);
        let service = UserManager::new(uow.clone());

        let updated = service
            .update_profile(&acting, changes(Some("newpass"), Some("newpass")))
            .await
            .unwrap();

        assert_eq!(updated.email.as_deref(), Some("alice@example.com"));
        assert_eq!(uow.outcome(), Some(Outcome::Committed));
    }

    #[tokio::test]
    async fn test_password_confirmation_must_match() {
        let me = user("alice", UserRole::Member);
        let acting = Actor::from(&me);
        let mut tx = TestTransaction::default();
        tx.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(me.clone())));
        tx.users.expect_update().never();
        let uow = TestUnitOfWork::new(tx);
        let service = UserManager::new(uow.clone());

        let result = service
            .update_profile(&acting, changes(Some("newpass"), Some("other")))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(uow.outcome(), Some(Outcome::RolledBack));
    }

    #[tokio::test]
    async fn test_unknown_actor_is_not_found() {
        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_id().returning(|_| Ok(None));
        let service = UserManager::new(TestUnitOfWork::new(tx));

        let result = service
            .update_profile(&actor(UserRole::Member), changes(None, None))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
