use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// SSE view over a store's push-on-write snapshot channel: one event with
/// the current snapshot immediately, then one per write.
pub(super) fn snapshot_sse<T>(
    event_name: &'static str,
    initial: Vec<T>,
    rx: broadcast::Receiver<Vec<T>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: Serialize + Clone + Send + 'static,
{
    let first = stream::iter(snapshot_event(event_name, &initial).map(Ok));
    let updates = stream::unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    if let Some(event) = snapshot_event(event_name, &snapshot) {
                        return Some((Ok(event), rx));
                    }
                }
                // Lagging only skipped intermediate snapshots; the next one
                // is still the full current state.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(first.chain(updates)).keep_alive(KeepAlive::default())
}

fn snapshot_event<T: Serialize>(event_name: &str, snapshot: &T) -> Option<Event> {
    Event::default().event(event_name).json_data(snapshot).ok()
}
