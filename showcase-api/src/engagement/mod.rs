//! Likes and bookmarks
//!
//! - [`toggle`]: flip a viewer's edge and return the new count
//! - [`snapshot`]: counts plus the viewer's own state, always recomputed

pub mod snapshot;
pub mod toggle;

pub use crate::store::{EngagementKind, ToggleOutcome};
pub use snapshot::{snapshot, EngagementSnapshot};
pub use toggle::toggle;

use crate::error::{Result, ServiceError};

/// Reject a missing or blank work identifier
fn require_work_id(work_id: &str) -> Result<&str> {
    if work_id.trim().is_empty() {
        return Err(ServiceError::InvalidArgument("Work ID required".to_string()));
    }
    Ok(work_id)
}

/// Non-blank viewer identity, or `None` for anonymous callers
fn present_viewer(viewer_id: Option<&str>) -> Option<&str> {
    viewer_id.filter(|v| !v.trim().is_empty())
}
