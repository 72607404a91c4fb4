//! User account command handlers

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService};

async fn auth_service(config: &Config) -> anyhow::Result<SeaOrmAuthService> {
    let store = Store::new(&config.general.database_path).await?;
    Ok(SeaOrmAuthService::new(store, config.security.clone()))
}

async fn find_user(auth: &SeaOrmAuthService, username: &str) -> anyhow::Result<crate::db::User> {
    auth.store()
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User '{username}' not found"))
}

pub async fn cmd_add_user(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let auth = auth_service(config).await?;

    let user = auth.create_user(username, password).await?;

    println!("✓ Created user '{}' (id {})", user.username, user.id);
    println!("  API key: {}", user.api_key);

    Ok(())
}

pub async fn cmd_set_password(
    config: &Config,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let auth = auth_service(config).await?;
    let user = find_user(&auth, username).await?;

    auth.set_password(user.id, password).await?;

    println!("✓ Password updated for '{username}'");
    Ok(())
}

pub async fn cmd_rotate_api_key(config: &Config, username: &str) -> anyhow::Result<()> {
    let auth = auth_service(config).await?;
    let user = find_user(&auth, username).await?;

    let api_key = auth.regenerate_api_key(user.id).await?;

    println!("✓ New API key for '{username}': {api_key}");
    println!("  The previous key no longer works.");
    Ok(())
}
