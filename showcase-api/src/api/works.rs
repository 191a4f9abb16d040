//! Feed, work detail and work submission endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use showcase_common::db::Work;
use tracing::debug;

use super::identity::Viewer;
use crate::error::ServiceError;
use crate::feed::{self, FeedFilter};
use crate::ingest::{self, NewWork};
use crate::pagination::{parse_offset, total_pages, PAGE_SIZE};
use crate::AppState;

/// Query parameters for the feed
///
/// Kept as raw strings: a present-but-empty `category` is a filter value,
/// and a malformed `offset` falls back to 0 instead of rejecting.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub offset: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl FeedQuery {
    /// Convert wire parameters into a feed filter
    pub fn into_filter(self) -> FeedFilter {
        FeedFilter {
            offset: parse_offset(self.offset.as_deref()),
            owner_id: self.user_id,
            title_contains: self.search,
            category: self.category,
        }
    }
}

/// Response carrying a list of works
#[derive(Debug, Serialize)]
pub struct WorksResponse {
    pub success: bool,
    pub works: Vec<Work>,
}

/// Response for GET /api/works/count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub success: bool,
    pub total: u64,
    pub page_size: i64,
    pub total_pages: u64,
}

/// Response carrying a single work
#[derive(Debug, Serialize)]
pub struct WorkResponse {
    pub success: bool,
    pub work: Work,
}

/// GET /api/works?offset=&search=&category=&userId=
///
/// At most 12 works, newest first.
pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<WorksResponse>, ServiceError> {
    let works = feed::query_feed(&state.store, &query.into_filter()).await?;

    Ok(Json(WorksResponse {
        success: true,
        works,
    }))
}

/// GET /api/works/count?search=&category=&userId=
///
/// Same filters as the feed; `offset` is accepted and ignored.
pub async fn get_feed_count(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<CountResponse>, ServiceError> {
    let total = feed::count_feed(&state.store, &query.into_filter()).await?;

    Ok(Json(CountResponse {
        success: true,
        total,
        page_size: PAGE_SIZE,
        total_pages: total_pages(total),
    }))
}

/// GET /api/works/:work_id
pub async fn get_work(
    State(state): State<AppState>,
    Path(work_id): Path<String>,
) -> Result<Json<WorkResponse>, ServiceError> {
    let work = feed::get_work(&state.store, &work_id).await?;

    Ok(Json(WorkResponse {
        success: true,
        work,
    }))
}

/// POST /api/works
///
/// 401 without identity, whatever the body. 400 for an unreadable body or
/// naming the first missing field.
pub async fn create_work(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    body: Result<Json<NewWork>, JsonRejection>,
) -> Result<Json<WorkResponse>, ServiceError> {
    if viewer.id().is_none() {
        return Err(ServiceError::Unauthenticated);
    }
    let Json(fields) = body.map_err(body_error)?;

    let work = ingest::create_work(&state.store, &state.events, viewer.id(), fields).await?;

    Ok(Json(WorkResponse {
        success: true,
        work,
    }))
}

/// Map an axum body rejection onto the error envelope
fn body_error(rejection: JsonRejection) -> ServiceError {
    debug!("Rejected work submission body: {}", rejection.body_text());

    let reason = match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON body",
        JsonRejection::JsonDataError(_) => "Work fields must be strings",
        _ => "Unreadable request body",
    };
    ServiceError::InvalidArgument(reason.to_string())
}
