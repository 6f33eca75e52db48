//! Nullable clock: deterministic transaction time for testing.

use std::sync::atomic::{AtomicU64, Ordering};

use ballot_store::TransactionClock;
use ballot_types::Timestamp;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Shareable across threads so racing
/// transactions can observe the same instant.
pub struct NullClock {
    current: AtomicU64,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.load(Ordering::SeqCst))
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, at: Timestamp) {
        self.current.store(at.as_secs(), Ordering::SeqCst);
    }
}

impl TransactionClock for NullClock {
    fn transaction_time(&self) -> Timestamp {
        self.now()
    }
}
