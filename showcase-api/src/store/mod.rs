//! Content store adapter
//!
//! Typed access to the three record kinds (Work, Like, Bookmark) over the
//! shared SQLite pool. Methods return raw `sqlx` results; the engines above
//! attach operation context when mapping them to `ServiceError`.

use sqlx::SqlitePool;

mod edges;
mod works;

pub use edges::{EngagementKind, ToggleOutcome};

/// Store handle shared by every request
#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    /// Wrap an initialized pool (see `showcase_common::db::init_database`)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
