//! showcase-api library - engagement and feed service
//!
//! Likes and bookmarks with consistent counts, filtered/paginated work feeds,
//! and validated work submission with cache invalidation signals.

use axum::http::HeaderName;
use axum::Router;
use showcase_common::events::EventBus;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod pagination;
pub mod store;

use store::ContentStore;

/// Default header carrying the caller identity
pub const DEFAULT_IDENTITY_HEADER: HeaderName = HeaderName::from_static("x-user-id");

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Content and engagement records
    pub store: ContentStore,
    /// Cache invalidation side channel
    pub events: EventBus,
    /// Trusted header the identity provider fills in
    pub identity_header: HeaderName,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, events: EventBus) -> Self {
        Self {
            store: ContentStore::new(db),
            events,
            identity_header: DEFAULT_IDENTITY_HEADER,
        }
    }

    /// Read caller identity from a different header
    pub fn with_identity_header(mut self, header: HeaderName) -> Self {
        self.identity_header = header;
        self
    }
}

/// Build application router
///
/// Every `/api` route passes through the identity middleware; `/health`
/// does not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/works", get(api::get_feed).post(api::create_work))
        .route("/api/works/count", get(api::get_feed_count))
        .route("/api/works/:work_id", get(api::get_work))
        .route("/api/works/:work_id/like", post(api::toggle_like))
        .route("/api/works/:work_id/bookmark", post(api::toggle_bookmark))
        .route("/api/works/:work_id/meta", get(api::engagement_meta))
        .route("/api/account/bookmarks", get(api::saved_works))
        .route("/api/events", get(api::event_stream))
        .route("/api/buildinfo", get(api::get_build_info))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::identity_middleware,
        ));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
