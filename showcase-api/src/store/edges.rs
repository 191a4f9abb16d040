//! Like and bookmark edges

use serde::Serialize;
use showcase_common::time::{now, to_millis};
use uuid::Uuid;

use super::ContentStore;

/// Which engagement edge set an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    Like,
    Bookmark,
}

impl EngagementKind {
    /// Backing table; a fixed identifier, never caller input
    pub fn table(&self) -> &'static str {
        match self {
            EngagementKind::Like => "likes",
            EngagementKind::Bookmark => "bookmarks",
        }
    }
}

/// Result of one toggle: the edge state after the call and the work's count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub count: u64,
    pub active: bool,
}

impl ContentStore {
    /// Flip the (work, user) edge and recount, as one transaction
    ///
    /// The transaction opens with the DELETE, so it takes SQLite's write lock
    /// up front and concurrent toggles on any pair run one after another.
    /// The INSERT is conflict-tolerant as a second line behind the
    /// `UNIQUE (work_id, user_id)` constraint. Dropping the future before
    /// commit rolls everything back.
    pub async fn toggle_edge(
        &self,
        kind: EngagementKind,
        work_id: &str,
        user_id: &str,
    ) -> sqlx::Result<ToggleOutcome> {
        let table = kind.table();
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(&format!(
            "DELETE FROM {table} WHERE work_id = ? AND user_id = ?"
        ))
        .bind(work_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let active = if removed > 0 {
            false
        } else {
            sqlx::query(&format!(
                "INSERT INTO {table} (id, work_id, user_id, created_at)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT (work_id, user_id) DO NOTHING"
            ))
            .bind(Uuid::new_v4().to_string())
            .bind(work_id)
            .bind(user_id)
            .bind(to_millis(now()))
            .execute(&mut *tx)
            .await?;
            true
        };

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE work_id = ?"
        ))
        .bind(work_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ToggleOutcome {
            count: count.max(0) as u64,
            active,
        })
    }

    /// Number of edges of `kind` for a work
    pub async fn count_edges(&self, kind: EngagementKind, work_id: &str) -> sqlx::Result<u64> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE work_id = ?",
            kind.table()
        ))
        .bind(work_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    /// Whether (work, user) currently has an edge of `kind`
    pub async fn edge_exists(
        &self,
        kind: EngagementKind,
        work_id: &str,
        user_id: &str,
    ) -> sqlx::Result<bool> {
        sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE work_id = ? AND user_id = ?)",
            kind.table()
        ))
        .bind(work_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }
}
