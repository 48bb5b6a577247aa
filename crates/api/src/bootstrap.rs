//! Startup tasks that prepare the database before the server accepts requests.

use catalog_core::error::CoreError;
use catalog_core::roles::ROLE_ADMIN;
use catalog_db::models::user::CreateUser;
use catalog_db::repositories::UserRepo;
use catalog_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Create the configured admin account if it does not exist yet.
///
/// Does nothing unless both `ADMIN_USERNAME` and `ADMIN_PASSWORD` are set.
/// An existing account is left untouched, password included. Returns `true`
/// when a user was created.
pub async fn ensure_admin_user(pool: &DbPool, config: &ServerConfig) -> AppResult<bool> {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        tracing::debug!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(false);
    };

    if UserRepo::find_by_username(pool, username).await?.is_some() {
        tracing::debug!(%username, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
