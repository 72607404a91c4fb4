//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{Store, User};
use crate::domain::UserId;
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

const MIN_PASSWORD_LEN: usize = 8;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}

fn check_password_length(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(LoginResult {
            user_id: user.id.value(),
            username: user.username,
            api_key: user.api_key,
        })
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.verify_api_key(api_key).await?)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }

        check_password_length(password)?;

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::Validation(format!(
                "Username '{username}' is already taken"
            )));
        }

        Ok(self
            .store
            .create_user(username, password, &self.security)
            .await?)
    }

    async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if current_password == new_password {
            return Err(AuthError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }
        check_password_length(new_password)?;

        let user = self.get_user(user_id).await?;
        if self
            .store
            .verify_user_password(&user.username, current_password)
            .await?
            .is_none()
        {
            return Err(AuthError::InvalidCredentials);
        }

        self.set_password(user_id, new_password).await
    }

    async fn set_password(&self, user_id: UserId, new_password: &str) -> Result<(), AuthError> {
        check_password_length(new_password)?;

        self.store
            .update_user_password(user_id, new_password, &self.security)
            .await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    async fn regenerate_api_key(&self, user_id: UserId) -> Result<String, AuthError> {
        // Surface a missing account as UserNotFound rather than a database error
        self.get_user(user_id).await?;

        let api_key = self.store.regenerate_user_api_key(user_id).await?;

        info!(user_id = %user_id, "API key regenerated");
        Ok(api_key)
    }
}
