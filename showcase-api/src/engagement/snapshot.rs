//! Engagement snapshot resolver

use serde::Serialize;
use tracing::error;

use super::{present_viewer, require_work_id, EngagementKind};
use crate::error::{Result, ServiceError};
use crate::store::ContentStore;

/// Aggregate counts for a work plus the viewer's own state
///
/// Derived on every call from the edge tables; never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSnapshot {
    pub likes_count: u64,
    pub bookmarks_count: u64,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

/// Resolve counts and viewer flags for one work
///
/// Read-only. Unknown works and anonymous viewers yield zero counts and
/// false flags rather than errors.
pub async fn snapshot(
    store: &ContentStore,
    work_id: &str,
    viewer_id: Option<&str>,
) -> Result<EngagementSnapshot> {
    let work_id = require_work_id(work_id)?;
    let viewer_id = present_viewer(viewer_id);

    let resolved = resolve(store, work_id, viewer_id).await.map_err(|e| {
        error!(
            "snapshot failed (work={}, viewer={:?}): {}",
            work_id, viewer_id, e
        );
        ServiceError::store("snapshot")(e)
    })?;

    Ok(resolved)
}

async fn resolve(
    store: &ContentStore,
    work_id: &str,
    viewer_id: Option<&str>,
) -> sqlx::Result<EngagementSnapshot> {
    let mut snapshot = EngagementSnapshot {
        likes_count: store.count_edges(EngagementKind::Like, work_id).await?,
        bookmarks_count: store.count_edges(EngagementKind::Bookmark, work_id).await?,
        ..EngagementSnapshot::default()
    };

    if let Some(viewer_id) = viewer_id {
        snapshot.is_liked = store
            .edge_exists(EngagementKind::Like, work_id, viewer_id)
            .await?;
        snapshot.is_bookmarked = store
            .edge_exists(EngagementKind::Bookmark, work_id, viewer_id)
            .await?;
    }

    Ok(snapshot)
}
