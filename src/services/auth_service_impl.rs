//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::db::{Store, User};
use crate::domain::UserId;
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

pub struct SeaOrmAuthService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let security = self.config.read().await.security.clone();

        let user = self
            .store
            .create_user(username, password, &security)
            .await?
            .ok_or_else(|| AuthError::UsernameTaken(username.to_string()))?;

        Ok(LoginResult::from(user))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(LoginResult::from(user))
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.verify_api_key(api_key).await?)
    }

    async fn get_user(&self, id: UserId) -> Result<User, AuthError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn regenerate_api_key(&self, id: UserId) -> Result<String, AuthError> {
        let key = self.store.regenerate_user_api_key(id).await?;
        info!("API key regenerated for user {}", id);
        Ok(key)
    }
}
