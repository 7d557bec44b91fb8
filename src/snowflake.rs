use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Guardlink epoch: 2025-01-01T00:00:00Z
const EPOCH: u64 = 1_735_689_600_000;

const SEQUENCE_BITS: u64 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

// Generator state packed as (timestamp << 12) | sequence and advanced in a
// single compare-exchange, so concurrent callers can never observe the same
// (timestamp, sequence) pair.
static STATE: AtomicU64 = AtomicU64::new(0);

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_millis() as u64
}

/// Generate a unique, time-sortable identifier. Used for session ids and
/// alert/visitor row ids.
pub fn generate() -> String {
    let mut current = STATE.load(Ordering::SeqCst);
    loop {
        let now = now_ms() - EPOCH;
        let last_timestamp = current >> SEQUENCE_BITS;
        let sequence = current & SEQUENCE_MASK;

        let next = if now > last_timestamp {
            now << SEQUENCE_BITS
        } else if sequence < SEQUENCE_MASK {
            // Same millisecond (or a clock that stepped backwards): bump the
            // sequence under the last-seen timestamp.
            current + 1
        } else {
            // Sequence exhausted for this millisecond; wait for the clock.
            std::hint::spin_loop();
            current = STATE.load(Ordering::SeqCst);
            continue;
        };

        match STATE.compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => {
                let timestamp = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                return ((timestamp << 22) | sequence).to_string();
            }
            Err(actual) => current = actual,
        }
    }
}

pub fn timestamp_of(id: &str) -> Option<u64> {
    let num: u64 = id.parse().ok()?;
    Some((num >> 22) + EPOCH)
}
