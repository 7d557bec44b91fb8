//! Durable stores with push-on-write subscriptions.
//!
//! Each store wraps the database pool and a `tokio::sync::broadcast`
//! notifier. Every write re-queries the newest-first snapshot and publishes
//! it to all subscribers, so a receiver always holds the full current state
//! and can reconcile anything it missed while disconnected. The gateway
//! never calls into these; they are consumed by the HTTP/SSE surface.

pub mod alerts;
pub mod visitors;

/// Capacity of each store's snapshot channel. A lagged receiver only skips
/// intermediate snapshots; the next one is still complete.
pub(crate) const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;
