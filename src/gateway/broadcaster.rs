use std::sync::Arc;

use super::events::EventFrame;
use super::registry::Registry;

/// Fans one named event out to every live session, the sender included.
///
/// Delivery is a non-blocking push into each session's outbound channel, so
/// a slow socket never stalls delivery to the rest; actual writes happen in
/// each connection's own task. At-most-once: no queue, no acknowledgement,
/// no retry. A session that is not connected when the event fires simply
/// misses it; durability belongs to the alert store, not this path.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<Registry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Deliver `(event, data)` to every live session. Returns the number of
    /// sessions the frame was handed to.
    pub fn dispatch(&self, event: &str, data: serde_json::Value) -> usize {
        let frame = EventFrame {
            event: event.to_string(),
            data: Some(data),
        };
        let text = match serde_json::to_string(&frame) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("failed to encode {event} frame: {e}");
                return 0;
            }
        };

        let mut delivered = 0;
        self.registry.for_each(|session| {
            // A send error means the receiver side is already gone — a
            // disconnect raced the fan-out. Isolated, never fatal.
            if session.tx.send(text.clone()).is_err() {
                tracing::warn!(
                    session_id = %session.session_id,
                    "dropped {event} delivery to closed session"
                );
            } else {
                delivered += 1;
            }
        });
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::session::Session;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn admit(registry: &Registry, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        registry
            .admit(Session {
                session_id: id.to_string(),
                connected_at: crate::db::now_rfc3339(),
                tx,
            })
            .unwrap();
        rx
    }

    #[test]
    fn delivers_to_every_session_including_sender() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let mut receivers = vec![
            admit(&registry, "a"),
            admit(&registry, "b"),
            admit(&registry, "c"),
        ];

        let payload = json!({"name": "Jane", "walletAddress": "0xabc"});
        let delivered = broadcaster.dispatch("sos", payload.clone());
        assert_eq!(delivered, 3);

        for rx in &mut receivers {
            let text = rx.try_recv().unwrap();
            let frame: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(frame["event"], "sos");
            assert_eq!(frame["data"], payload);
            // Exactly one delivery per session.
            assert!(rx.try_recv().is_err());
        }
    }

    #[test]
    fn closed_receiver_does_not_block_the_rest() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let mut alive = admit(&registry, "alive");
        let dead = admit(&registry, "dead");
        drop(dead);

        let delivered = broadcaster.dispatch("sos", json!({"name": "Jane"}));
        assert_eq!(delivered, 1);
        assert!(alive.try_recv().is_ok());
    }

    #[test]
    fn removed_session_receives_nothing() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let mut a = admit(&registry, "a");
        let mut b = admit(&registry, "b");

        registry.remove("b");
        let delivered = broadcaster.dispatch("sos", json!({"name": "Jane"}));
        assert_eq!(delivered, 1);
        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_err());
    }

    #[test]
    fn empty_registry_is_a_noop() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(registry);
        assert_eq!(broadcaster.dispatch("sos", json!({"name": "Jane"})), 0);
    }

    #[test]
    fn per_source_order_is_preserved_per_destination() {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        let mut rx = admit(&registry, "a");

        for i in 0..10 {
            broadcaster.dispatch("sos", json!({"seq": i}));
        }
        for i in 0..10 {
            let frame: serde_json::Value =
                serde_json::from_str(&rx.try_recv().unwrap()).unwrap();
            assert_eq!(frame["data"]["seq"], i);
        }
    }
}
