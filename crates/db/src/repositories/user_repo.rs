//! Repository for the `users` table.

use catalog_core::types::DbId;
use sqlx::SqlitePool;

use super::NOW_SQL;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, password_hash, role, is_active, last_login_at, created_at, updated_at";

/// Provides the account operations the admin interface needs.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, role)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_login_at` after a successful login.
    pub async fn record_successful_login(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        let query = format!(
            "UPDATE users SET last_login_at = {NOW_SQL}, updated_at = {NOW_SQL} WHERE id = ?"
        );
        sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(())
    }

    /// Enable or disable an account. Returns `true` if a row was updated.
    pub async fn set_active(pool: &SqlitePool, id: DbId, is_active: bool) -> Result<bool, sqlx::Error> {
        let query = format!("UPDATE users SET is_active = ?, updated_at = {NOW_SQL} WHERE id = ?");
        let result = sqlx::query(&query)
            .bind(is_active)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
