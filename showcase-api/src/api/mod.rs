//! HTTP API handlers for showcase-api

pub mod account;
pub mod buildinfo;
pub mod engagement;
pub mod health;
pub mod identity;
pub mod sse;
pub mod works;

pub use account::saved_works;
pub use buildinfo::get_build_info;
pub use engagement::{engagement_meta, toggle_bookmark, toggle_like};
pub use health::health_routes;
pub use identity::{identity_middleware, Viewer};
pub use sse::event_stream;
pub use works::{create_work, get_feed, get_feed_count, get_work};
