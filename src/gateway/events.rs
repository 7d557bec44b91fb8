use serde::{Deserialize, Serialize};

/// The only inbound event name the gateway interprets. Its payload is
/// re-broadcast verbatim under the same name to every live session.
pub const SOS: &str = "sos";

/// Handshake frame sent once per connection, right after admission. Carries
/// the assigned session id; clients may ignore it.
pub const HELLO: &str = "hello";

/// Named-event wire envelope. Every frame on the gateway socket, in both
/// directions, is one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}
