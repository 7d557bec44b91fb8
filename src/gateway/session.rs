use tokio::sync::mpsc;

/// One live client connection admitted to the registry.
///
/// The registry owns the session for its whole lifetime; nothing else holds
/// onto it past `remove`. `tx` feeds the connection's socket task, which is
/// the only writer to the underlying sink.
#[derive(Debug)]
pub struct Session {
    pub session_id: String,
    pub connected_at: String,
    pub tx: mpsc::UnboundedSender<String>,
}
