//! Caller identity middleware
//!
//! The identity provider sits in front of this service and forwards the
//! caller's opaque user id in a trusted header (`x-user-id` by default).
//! The middleware turns that header into a [`Viewer`] request extension;
//! a missing or blank header means an anonymous caller.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::trace;

use crate::AppState;

/// Identity of the current caller, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<String>);

impl Viewer {
    /// Caller id, `None` when anonymous
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Attach a [`Viewer`] to every request
///
/// Never rejects: operations that need an identity report
/// `Unauthenticated` themselves.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let viewer = request
        .headers()
        .get(&state.identity_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    trace!("Request viewer: {:?}", viewer);
    request.extensions_mut().insert(Viewer(viewer));

    next.run(request).await
}
