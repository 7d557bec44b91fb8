pub mod broadcaster;
pub mod events;
pub mod registry;
pub mod session;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::snowflake;
use crate::state::AppState;
use events::EventFrame;
use session::Session;

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection task: admit, hello, event loop, remove.
///
/// Every connection goes through the same lifecycle independently; an error
/// on one socket tears down only that socket.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Frames addressed to this client land here. Only this task writes to
    // the sink, so per-source delivery order is preserved per connection.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let session_id = snowflake::generate();
    let connected_at = crate::db::now_rfc3339();
    if let Err(e) = state.registry.admit(Session {
        session_id: session_id.clone(),
        connected_at: connected_at.clone(),
        tx,
    }) {
        // Fresh snowflakes never collide; reaching this is a bug upstream.
        tracing::error!("rejecting connection: {e}");
        return;
    }
    tracing::debug!(session_id = %session_id, "session connected");

    let hello = serde_json::json!({
        "event": events::HELLO,
        "data": {
            "session_id": session_id,
            "connected_at": connected_at,
            "server_version": env!("CARGO_PKG_VERSION")
        }
    });
    if ws_sink
        .send(Message::Text(hello.to_string().into()))
        .await
        .is_err()
    {
        state.registry.remove(&session_id);
        return;
    }

    loop {
        tokio::select! {
            // Outbound frames fanned in from the broadcaster
            Some(frame) = rx.recv() => {
                if ws_sink.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            // Inbound frames from the client
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Malformed frames are ignored, not fatal.
                        if let Ok(frame) = serde_json::from_str::<EventFrame>(&text) {
                            if frame.event == events::SOS {
                                // The payload passes through opaquely; its
                                // content is the receiving collaborators'
                                // concern, not the gateway's.
                                let data = frame.data.unwrap_or(serde_json::Value::Null);
                                let delivered = state.broadcaster.dispatch(events::SOS, data);
                                tracing::info!(
                                    session_id = %session_id,
                                    delivered,
                                    "sos fanned out"
                                );
                            }
                            // Any other event name is ignored here.
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    // Removal is synchronous with teardown: once this returns, the session
    // can no longer be visited by a fan-out.
    state.registry.remove(&session_id);
    tracing::debug!(session_id = %session_id, "session disconnected");
}
