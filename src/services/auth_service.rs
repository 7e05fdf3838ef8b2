//! Domain service for accounts: registration, login and API keys.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;
use crate::domain::UserId;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Returned by login and registration.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub id: i32,
    pub username: String,
    pub api_key: String,
}

impl From<User> for LoginResult {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            api_key: user.api_key,
        }
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] when the username exists.
    async fn register(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError>;

    async fn get_user(&self, id: UserId) -> Result<User, AuthError>;

    async fn regenerate_api_key(&self, id: UserId) -> Result<String, AuthError>;
}
