//! Server-Sent Events for cache invalidation
//!
//! View caches subscribe here to learn which feed views went stale.

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events - SSE stream of `CacheInvalidated` events
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    showcase_common::sse::create_event_sse_stream("showcase-api", state.events.subscribe())
}
