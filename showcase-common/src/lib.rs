//! # Showcase Common Library
//!
//! Shared code for the showcase services:
//! - Database initialisation and record models (works, likes, bookmarks)
//! - Cache invalidation events and the EventBus that carries them
//! - Configuration loading and root folder resolution
//! - SSE helpers and timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod sse;
pub mod time;

pub use error::{Error, Result};
