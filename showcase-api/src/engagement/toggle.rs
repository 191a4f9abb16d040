//! Engagement toggle engine

use tracing::{error, info};

use super::{present_viewer, require_work_id, EngagementKind, ToggleOutcome};
use crate::error::{Result, ServiceError};
use crate::store::ContentStore;

/// Create the viewer's edge if absent, delete it if present
///
/// Returns the edge state after the call and the work's edge count. Identity
/// is checked before the work id, and both before touching the store. On a
/// store fault nothing is mutated: the flip and the recount commit together.
pub async fn toggle(
    store: &ContentStore,
    kind: EngagementKind,
    work_id: &str,
    viewer_id: Option<&str>,
) -> Result<ToggleOutcome> {
    let viewer_id = present_viewer(viewer_id).ok_or(ServiceError::Unauthenticated)?;
    let work_id = require_work_id(work_id)?;

    let outcome = store
        .toggle_edge(kind, work_id, viewer_id)
        .await
        .map_err(|e| {
            error!(
                "toggle {:?} failed (work={}, viewer={}): {}",
                kind, work_id, viewer_id, e
            );
            ServiceError::store("toggle")(e)
        })?;

    info!(
        "{:?} {} on work {} by {} (count={})",
        kind,
        if outcome.active { "added" } else { "removed" },
        work_id,
        viewer_id,
        outcome.count
    );

    Ok(outcome)
}
