//! SQLite connection pool management for the conversation store.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DatabaseConfig;

/// Open (creating if missing) the conversation database pool.
pub async fn create_pool(config: &DatabaseConfig) -> DomainResult<SqlitePool> {
    ensure_database_directory(&config.path)?;

    let connect_options = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path))
        .map_err(|e| DomainError::Persistence(format!("invalid database path: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(connect_options)
        .await
        .map_err(|e| DomainError::Persistence(format!("pool creation: {e}")))?;

    Ok(pool)
}

/// In-memory pool for tests.
pub async fn create_test_pool() -> DomainResult<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| DomainError::Persistence(e.to_string()))?
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options)
        .await
        .map_err(|e| DomainError::Persistence(format!("pool creation: {e}")))
}

fn ensure_database_directory(path: &str) -> DomainResult<()> {
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Persistence(format!("create directory: {e}")))?;
        }
    }
    Ok(())
}
