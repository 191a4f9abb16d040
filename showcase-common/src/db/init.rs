//! Database initialization
//!
//! Creates the database on first run and idempotently creates the content
//! and engagement tables on every start.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Current schema version recorded in `schema_version`
pub const SCHEMA_VERSION: i64 = 1;

/// How long a connection waits on a locked database before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Pragmas go on the connect options so every pooled connection gets them,
    // busy_timeout in particular: toggles serialize on the SQLite write lock.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent - safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;
    create_works_table(pool).await?;
    create_edge_table(pool, "likes").await?;
    create_edge_table(pool, "bookmarks").await?;

    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the works table
///
/// `seq` is the insertion sequence and breaks ties between works created in
/// the same millisecond, so feed pagination is stable across calls.
/// `title_folded` holds the Unicode-lowercased title for case-insensitive
/// search; SQLite's own `lower()` folds ASCII only.
pub async fn create_works_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS works (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            title_folded TEXT NOT NULL,
            description TEXT NOT NULL,
            image TEXT NOT NULL,
            live_site_url TEXT NOT NULL,
            github_url TEXT NOT NULL,
            category TEXT,
            created_at INTEGER NOT NULL,
            CHECK (title <> ''),
            CHECK (description <> ''),
            CHECK (image <> ''),
            CHECK (live_site_url <> ''),
            CHECK (github_url <> '')
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_works_created ON works(created_at DESC, seq DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_works_user ON works(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_works_category ON works(category)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create an engagement edge table (`likes` or `bookmarks`)
///
/// No foreign key to `works`: engaging with an unknown work is a valid
/// zero-state operation. The unique constraint is what keeps at most one
/// edge per (work, user).
async fn create_edge_table(pool: &SqlitePool, table: &'static str) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id TEXT PRIMARY KEY,
            work_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            UNIQUE (work_id, user_id)
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_work ON {table}(work_id)"
    ))
    .execute(pool)
    .await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_user ON {table}(user_id)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}
