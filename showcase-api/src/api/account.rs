//! Signed-in viewer's saved works

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use showcase_common::db::Work;

use super::identity::Viewer;
use crate::error::ServiceError;
use crate::feed;
use crate::pagination::total_pages;
use crate::AppState;

/// Response for GET /api/account/bookmarks
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorksResponse {
    pub success: bool,
    pub works: Vec<Work>,
    pub page_count: u64,
}

/// GET /api/account/bookmarks
///
/// Works the caller has bookmarked, newest work first. 401 when anonymous.
pub async fn saved_works(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<SavedWorksResponse>, ServiceError> {
    let works = feed::saved_works(&state.store, viewer.id()).await?;
    let page_count = total_pages(works.len() as u64);

    Ok(Json(SavedWorksResponse {
        success: true,
        works,
        page_count,
    }))
}
