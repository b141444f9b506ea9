//! SQLite pool construction and `todos` table DDL.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open the SQLite database behind `database_url`, creating the file if it
/// does not exist yet. Call before [`ensure_schema`].
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(AppError::Db)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the single `todos` table if missing.
///
/// AUTOINCREMENT keeps ids monotonically increasing and never reused after
/// a delete. The NOCASE unique constraint on `title` is the race-safe guard
/// behind the application-level pre-check; titles are stored already
/// trimmed, so the constraint sees the canonical form.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            title     TEXT NOT NULL COLLATE NOCASE UNIQUE,
            completed INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
