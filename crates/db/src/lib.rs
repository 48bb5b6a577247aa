//! SQLite access layer: pool construction, migrations, models and repositories.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Demo catalog loaded by [`seed_demo_data`].
const DEMO_SEED_SQL: &str = include_str!("../../../db/seeds/demo.sql");

/// Create a connection pool from a database URL.
///
/// The database file is created if it does not exist yet, and foreign keys
/// are enforced on every connection.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Cheap round-trip used by startup checks and `GET /health`.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Load the demo catalog if the catalog is completely empty.
///
/// Returns `true` when the seed was applied.
pub async fn seed_demo_data(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let (categories, products): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM categories), (SELECT COUNT(*) FROM products)",
    )
    .fetch_one(pool)
    .await?;

    if categories > 0 || products > 0 {
        tracing::debug!(categories, products, "Catalog not empty, skipping demo seed");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    sqlx::raw_sql(DEMO_SEED_SQL).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Demo catalog seeded");
    Ok(true)
}
