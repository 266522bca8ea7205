//! Authentication service - login, token verification and registration.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{
    authorize, Actor, NewUser, Operation, Password, Resource, User, UserRole, SECONDS_PER_HOUR,
    TOKEN_TYPE_BEARER,
};

use crate::infra::{settle, Transaction, UnitOfWork};

/// Verified against when the username is unknown, so both failure paths
/// cost one hash verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$0ZxXJ6sAbNnV8sEQFmhUq0a0QzGfZy5kC2ND3t4tTj0";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Register a new user; admin only
    async fn register(&self, actor: &Actor, new_user: NewUser) -> AppResult<User>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &JwtConfig) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.expiration_hours * SECONDS_PER_HOUR,
    })
}

async fn insert_user(tx: &dyn Transaction, new_user: NewUser) -> AppResult<User> {
    let role = new_user.validate()?;

    let username = new_user.username.trim().to_string();
    if tx.users().find_by_username(&username).await?.is_some() {
        return Err(AppError::conflict("Username"));
    }

    let password = Password::new(&new_user.password)?;
    let user = tx
        .users()
        .insert(User::new(username, password, role))
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: JwtConfig,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: JwtConfig) -> Self {
        Self { uow, config }
    }

    /// Create an admin account without an acting user. Used to seed the
    /// first administrator from the command line.
    pub async fn bootstrap_admin(&self, username: String, password: String) -> AppResult<User> {
        let new_user = NewUser {
            username,
            confirm_password: password.clone(),
            password,
            role: UserRole::Admin.to_string(),
        };

        let tx = self.uow.begin().await?;
        let outcome = insert_user(tx.as_ref(), new_user).await;
        settle(tx, outcome).await
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let tx = self.uow.begin().await?;
        let outcome = tx.users().find_by_username(username.trim()).await;
        let user = settle(tx, outcome).await?;

        let stored_hash = user
            .as_ref()
            .map_or(DUMMY_HASH, |user| user.password_hash.as_str());
        let password_valid = Password::from_hash(stored_hash.to_string()).verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::debug!(user_id = %user.id, "Login succeeded");
                generate_token(&user, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn register(&self, actor: &Actor, new_user: NewUser) -> AppResult<User> {
        authorize(actor, Operation::Create, Resource::Users)?;

        let tx = self.uow.begin().await?;
        let outcome = insert_user(tx.as_ref(), new_user).await;
        settle(tx, outcome).await
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{actor, user, Outcome, TestTransaction, TestUnitOfWork};

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-that-is-long-enough".to_string(),
            expiration_hours: 1,
        }
    }

    fn new_user(username: &str, password: &str, confirm: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            role: "member".to_string(),
        }
    }

    #[tokio::test]
    async fn test_admin_registers_member() {
        let mut tx = TestTransaction::default();
        tx.users
            .expect_find_by_username()
            .withf(|username| username.to_string() == "bob")
            .returning(|_| Ok(None));
        tx.users
            .expect_insert()
            .withf(|u| u.username == "bob" && u.role == UserRole::Member && u.check_password("secret1"))
            .returning(|u| Ok(u));
        let uow = TestUnitOfWork::new(tx);
        let service = Authenticator::new(uow.clone(), jwt());

        let created = service
            .register(&actor(UserRole::Admin), new_user(" bob ", "secret1", "secret1"))
            .await
            .unwrap();

        assert_eq!(created.username, "bob");
        assert_eq!(uow.outcome(), Some(Outcome::Committed));
    }

    #[tokio::test]
    async fn test_non_admin_cannot_register() {
        let uow = TestUnitOfWork::new(TestTransaction::default());
        let service = Authenticator::new(uow.clone(), jwt());

        let result = service
            .register(&actor(UserRole::Manager), new_user("bob", "secret1", "secret1"))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert_eq!(uow.outcome(), None);
    }

    #[tokio::test]
    async fn test_non_admin_is_refused_before_the_payload_is_checked() {
        let uow = TestUnitOfWork::new(TestTransaction::default());
        let service = Authenticator::new(uow.clone(), jwt());
        let mut malformed = new_user("al", "x", "y");
        malformed.role = "owner".to_string();

        let result = service.register(&actor(UserRole::Manager), malformed).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert_eq!(uow.outcome(), None);
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected_for_admin() {
        let mut tx = TestTransaction::default();
        tx.users.expect_insert().never();
        let service = Authenticator::new(TestUnitOfWork::new(tx), jwt());
        let mut owner = new_user("erin", "secret1", "secret1");
        owner.role = "owner".to_string();

        let result = service.register(&actor(UserRole::Admin), owner).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts_and_rolls_back() {
        let mut tx = TestTransaction::default();
        tx.users
            .expect_find_by_username()
            .returning(|username| Ok(Some(user(username, UserRole::Member))));
        tx.users.expect_insert().never();
        let uow = TestUnitOfWork::new(tx);
        let service = Authenticator::new(uow.clone(), jwt());

        let result = service
            .register(&actor(UserRole::Admin), new_user("alice", "secret1", "secret1"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(uow.outcome(), Some(Outcome::RolledBack));
    }

    #[tokio::test]
    async fn test_mismatched_confirmation_is_rejected() {
        let mut tx = TestTransaction::default();
        tx.users.expect_insert().never();
        let uow = TestUnitOfWork::new(tx);
        let service = Authenticator::new(uow, jwt());

        let result = service
            .register(&actor(UserRole::Admin), new_user("carol", "secret1", "secret2"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_username().returning(|username| {
            let password = Password::new("secret1").unwrap();
            Ok(Some(User::new(username.to_string(), password, UserRole::Manager)))
        });
        let service = Authenticator::new(TestUnitOfWork::new(tx), jwt());

        let token = service
            .login("dana".to_string(), "secret1".to_string())
            .await
            .unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.username, "dana");
        assert_eq!(claims.role, "manager");
    }

    #[tokio::test]
    async fn test_login_wrong_password_or_unknown_user() {
        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_username().returning(|username| {
            let password = Password::new("secret1").unwrap();
            Ok(Some(User::new(username.to_string(), password, UserRole::Member)))
        });
        let service = Authenticator::new(TestUnitOfWork::new(tx), jwt());
        let result = service.login("dana".to_string(), "wrong-pass".to_string()).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));

        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_username().returning(|_| Ok(None));
        let service = Authenticator::new(TestUnitOfWork::new(tx), jwt());
        let result = service.login("ghost".to_string(), "secret1".to_string()).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let service = Authenticator::new(TestUnitOfWork::new(TestTransaction::default()), jwt());
        assert!(service.verify_token("not.a.token").is_err());
    }

    #[tokio::test]
    async fn test_bootstrap_admin_skips_policy() {
        let mut tx = TestTransaction::default();
        tx.users.expect_find_by_username().returning(|_| Ok(None));
        tx.users
            .expect_insert()
            .withf(|u| u.role == UserRole::Admin)
            .returning(|u| Ok(u));
        let uow = TestUnitOfWork::new(tx);
        let service = Authenticator::new(uow.clone(), jwt());

        let admin = service
            .bootstrap_admin("root".to_string(), "changeme".to_string())
            .await
            .unwrap();

        assert!(admin.is_admin());
        assert_eq!(uow.outcome(), Some(Outcome::Committed));
    }
}
