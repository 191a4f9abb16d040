//! Server-Sent Events (SSE) utilities

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::events::ShowcaseEvent;

/// Stream EventBus events to an SSE client
///
/// Sends an initial `ConnectionStatus` event, then one SSE event per bus
/// event (event name from [`ShowcaseEvent::event_type`], JSON data). A
/// subscriber that falls behind skips the lost events and keeps streaming.
/// The stream ends when the bus is dropped.
pub fn create_event_sse_stream(
    service_name: &'static str,
    mut rx: broadcast::Receiver<ShowcaseEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} events", service_name);

    let stream = async_stream::stream! {
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => {
                    debug!("SSE: forwarding {}", event.event_type());
                    match Event::default().event(event.event_type()).json_data(&event) {
                        Ok(sse_event) => yield Ok(sse_event),
                        Err(e) => warn!("SSE: failed to serialize event: {}", e),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE: {} client lagged, skipped {} events", service_name, skipped);
                }
                Err(RecvError::Closed) => {
                    info!("SSE: {} event bus closed", service_name);
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
