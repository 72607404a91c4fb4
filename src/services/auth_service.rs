//! Domain service for authentication and user management.
//!
//! Resolves the caller behind a session or API key and manages accounts.

use serde::Serialize;
use thiserror::Error;

use crate::db::User;
use crate::domain::UserId;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Login result containing user info and API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user_id: i32,
    pub username: String,
    pub api_key: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Returns the user owning an API key, if any.
    async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError>;

    /// Looks up a user referenced by a session.
    async fn get_user(&self, user_id: UserId) -> Result<User, AuthError>;

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for empty usernames, short passwords
    /// or a username that is already taken.
    async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Changes a password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if `current_password` is wrong
    /// and [`AuthError::Validation`] if the new password is too short or
    /// unchanged.
    async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Sets a password without the current one. Used by the CLI.
    async fn set_password(&self, user_id: UserId, new_password: &str) -> Result<(), AuthError>;

    /// Issues a fresh API key, invalidating the old one.
    async fn regenerate_api_key(&self, user_id: UserId) -> Result<String, AuthError>;
}
