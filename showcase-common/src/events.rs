//! Event types for the showcase event system
//!
//! Provides the cache invalidation event and the EventBus that carries it to
//! view-cache collaborators (SSE clients, in-process subscribers).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Showcase event types
///
/// Serialized with a `type` tag for SSE transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShowcaseEvent {
    /// A cached view is stale and should be recomputed
    ///
    /// `path` is an opaque view key such as `/` or `/?category=Streetwear`.
    CacheInvalidated {
        path: String,
        timestamp: DateTime<Utc>,
    },
}

impl ShowcaseEvent {
    /// Build an invalidation event for `path`, stamped now
    pub fn invalidate(path: impl Into<String>) -> Self {
        ShowcaseEvent::CacheInvalidated {
            path: path.into(),
            timestamp: crate::time::now(),
        }
    }

    /// Event type name, used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            ShowcaseEvent::CacheInvalidated { .. } => "CacheInvalidated",
        }
    }
}

/// Central event distribution bus
///
/// Wraps `tokio::sync::broadcast`: publishing never blocks on slow
/// subscribers, and a lagging subscriber loses the oldest events.
///
/// # Examples
///
/// ```
/// use showcase_common::events::{EventBus, ShowcaseEvent};
///
/// let event_bus = EventBus::new(16);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit(ShowcaseEvent::invalidate("/")).ok();
/// assert!(matches!(rx.try_recv(), Ok(ShowcaseEvent::CacheInvalidated { .. })));
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ShowcaseEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus buffering `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<ShowcaseEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ShowcaseEvent,
    ) -> Result<usize, broadcast::error::SendError<ShowcaseEvent>> {
        self.tx.send(event)
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
