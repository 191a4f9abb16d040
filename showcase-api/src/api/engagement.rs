//! Like, bookmark and engagement meta endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use super::identity::Viewer;
use crate::engagement::{self, EngagementKind, EngagementSnapshot};
use crate::error::ServiceError;
use crate::AppState;

/// Response for POST /api/works/:work_id/like
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub likes_count: u64,
    pub liked: bool,
}

/// Response for POST /api/works/:work_id/bookmark
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub success: bool,
    pub bookmarks_count: u64,
    pub bookmarked: bool,
}

/// Response for GET /api/works/:work_id/meta
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub success: bool,
    #[serde(flatten)]
    pub snapshot: EngagementSnapshot,
}

/// POST /api/works/:work_id/like
///
/// Toggles the caller's like. 401 without identity.
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(work_id): Path<String>,
) -> Result<Json<LikeResponse>, ServiceError> {
    let outcome =
        engagement::toggle(&state.store, EngagementKind::Like, &work_id, viewer.id()).await?;

    Ok(Json(LikeResponse {
        success: true,
        likes_count: outcome.count,
        liked: outcome.active,
    }))
}

/// POST /api/works/:work_id/bookmark
///
/// Toggles the caller's bookmark. 401 without identity.
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(work_id): Path<String>,
) -> Result<Json<BookmarkResponse>, ServiceError> {
    let outcome =
        engagement::toggle(&state.store, EngagementKind::Bookmark, &work_id, viewer.id()).await?;

    Ok(Json(BookmarkResponse {
        success: true,
        bookmarks_count: outcome.count,
        bookmarked: outcome.active,
    }))
}

/// GET /api/works/:work_id/meta
///
/// Counts plus the caller's flags; anonymous callers get false flags.
pub async fn engagement_meta(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(work_id): Path<String>,
) -> Result<Json<MetaResponse>, ServiceError> {
    let snapshot = engagement::snapshot(&state.store, &work_id, viewer.id()).await?;

    Ok(Json(MetaResponse {
        success: true,
        snapshot,
    }))
}
