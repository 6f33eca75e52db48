//! Nullable ledger: thread-safe in-memory versioned store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use ballot_store::{
    History, HistoryEntry, HistoryStore, LedgerStore, StoreError, Version, VersionedValue,
};
use ballot_types::Timestamp;

#[derive(Default)]
struct Slot {
    current: Option<VersionedValue>,
    history: Vec<HistoryEntry>,
}

/// An in-memory ledger with the same compare-and-set semantics as the LMDB
/// backend. Writes can be made to fail on demand to exercise fault paths.
pub struct NullLedger {
    slots: Mutex<HashMap<String, Slot>>,
    fail_writes: AtomicBool,
    commits: AtomicUsize,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            commits: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent `put` fail with a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful commits across all keys.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Raw current bytes of a key, bypassing versions.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.slots
            .lock()
            .unwrap()
            .get(key)
            .and_then(|slot| slot.current.as_ref())
            .map(|v| v.value.clone())
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for NullLedger {
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError> {
        Ok(self
            .slots
            .lock()
            .unwrap()
            .get(key)
            .and_then(|slot| slot.current.clone()))
    }

    fn put(
        &self,
        key: &str,
        value: &[u8],
        expected: Option<Version>,
        committed_at: Timestamp,
    ) -> Result<Version, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.entry(key.to_string()).or_default();
        let actual = slot.current.as_ref().map(|v| v.version);
        if actual != expected {
            return Err(StoreError::VersionConflict {
                key: key.to_string(),
                expected,
                actual,
            });
        }
        let version = Version::after(expected);
        slot.current = Some(VersionedValue {
            value: value.to_vec(),
            version,
        });
        slot.history.push(HistoryEntry {
            version,
            committed_at,
            value: value.to_vec(),
        });
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(version)
    }
}

impl HistoryStore for NullLedger {
    fn history_of(&self, key: &str) -> Result<History, StoreError> {
        let entries = self
            .slots
            .lock()
            .unwrap()
            .get(key)
            .map(|slot| slot.history.clone())
            .unwrap_or_default();
        Ok(History::new(entries))
    }
}
