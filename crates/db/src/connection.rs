use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use optica_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Open a pool with default sizing. Prefer [`connect_from_config`] whenever
/// an [`optica_core::config::AppConfig`] is in hand.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(database_url, 5, 30).await
}

/// Open a pool using the settings from a loaded configuration.
pub async fn connect_from_config(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(&config.url, config.max_connections, config.timeout_secs).await
}

/// Open a pool with explicit sizing. Every connection enables foreign keys
/// (the catalog schema relies on them for tier and score ownership), WAL
/// journaling, and a busy timeout for concurrent local processes.
pub async fn connect_with_settings(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs.max(1)))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}
