//! Versioned key-value ledger traits.
//!
//! Every committed write bumps the entry's [`Version`]. Writers pass the
//! version they read; the backend rejects the write with
//! [`StoreError::VersionConflict`] if anything committed in between.

use std::fmt;
use std::sync::Arc;

use ballot_types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Monotonic per-key version assigned by the ledger on commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(u64);

impl Version {
    /// Version of the first committed value under a key.
    pub const INITIAL: Self = Self(1);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Version a successful write produces given the version it was based on.
    pub fn after(expected: Option<Version>) -> Self {
        expected.map_or(Self::INITIAL, |v| v.next())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A value read from the ledger together with the version it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: Version,
}

/// Trait for the ledger's current-state view with optimistic concurrency.
pub trait LedgerStore: Send + Sync {
    /// Read the latest committed value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError>;

    /// Write `value` if the key is still at `expected`.
    ///
    /// `expected == None` means the key must not exist yet. Returns the newly
    /// committed version.
    fn put(
        &self,
        key: &str,
        value: &[u8],
        expected: Option<Version>,
        committed_at: Timestamp,
    ) -> Result<Version, StoreError>;
}

/// One committed revision of a key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: Version,
    pub committed_at: Timestamp,
    pub value: Vec<u8>,
}

/// Finite, single-pass sequence of revisions, oldest first.
pub struct History {
    entries: std::vec::IntoIter<HistoryEntry>,
}

impl History {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl Iterator for History {
    type Item = HistoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

/// Trait for reading the audit trail of a key.
pub trait HistoryStore: Send + Sync {
    fn history_of(&self, key: &str) -> Result<History, StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError> {
        (**self).get(key)
    }

    fn put(
        &self,
        key: &str,
        value: &[u8],
        expected: Option<Version>,
        committed_at: Timestamp,
    ) -> Result<Version, StoreError> {
        (**self).put(key, value, expected, committed_at)
    }
}

impl<T: HistoryStore + ?Sized> HistoryStore for Arc<T> {
    fn history_of(&self, key: &str) -> Result<History, StoreError> {
        (**self).history_of(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_after_none_is_initial() {
        assert_eq!(Version::after(None), Version::INITIAL);
        assert_eq!(Version::after(Some(Version::new(4))), Version::new(5));
    }

    #[test]
    fn history_is_single_pass() {
        let entry = HistoryEntry {
            version: Version::INITIAL,
            committed_at: Timestamp::new(10),
            value: vec![1],
        };
        let mut history = History::new(vec![entry.clone()]);
        assert_eq!(history.size_hint(), (1, Some(1)));
        assert_eq!(history.next(), Some(entry));
        assert_eq!(history.next(), None);
    }
}
