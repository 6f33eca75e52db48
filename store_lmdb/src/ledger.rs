//! LMDB implementation of LedgerStore and HistoryStore.
//!
//! The version check and the write share one LMDB write transaction. LMDB
//! admits a single writer at a time, so the compare-and-set is atomic even
//! across processes sharing the environment.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use serde::{Deserialize, Serialize};

use ballot_store::{
    History, HistoryEntry, HistoryStore, LedgerStore, StoreError, Version, VersionedValue,
};
use ballot_types::Timestamp;

use crate::LmdbError;

/// Separates the logical key from the big-endian version in history keys so
/// that a prefix scan for `"election"` never matches `"election2"`.
const HISTORY_SEPARATOR: u8 = 0x00;

#[derive(Serialize, Deserialize)]
struct StoredEntry {
    version: Version,
    value: Vec<u8>,
}

pub struct LmdbLedgerStore {
    pub(crate) env: Arc<Env>,
    pub(crate) entries_db: Database<Bytes, Bytes>,
    pub(crate) history_db: Database<Bytes, Bytes>,
}

fn history_prefix(key: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(key.len() + 1);
    prefix.extend_from_slice(key.as_bytes());
    prefix.push(HISTORY_SEPARATOR);
    prefix
}

fn history_key(key: &str, version: Version) -> Vec<u8> {
    let mut hk = history_prefix(key);
    hk.extend_from_slice(&version.get().to_be_bytes());
    hk
}

fn decode_entry(key: &str, bytes: &[u8]) -> Result<StoredEntry, StoreError> {
    bincode::deserialize(bytes)
        .map_err(|e| StoreError::Corruption(format!("entry '{}': {}", key, e)))
}

impl LedgerStore for LmdbLedgerStore {
    fn get(&self, key: &str) -> Result<Option<VersionedValue>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let stored = self
            .entries_db
            .get(&rtxn, key.as_bytes())
            .map_err(LmdbError::from)?;
        match stored {
            Some(bytes) => {
                let entry = decode_entry(key, bytes)?;
                Ok(Some(VersionedValue {
                    value: entry.value,
                    version: entry.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn put(
        &self,
        key: &str,
        value: &[u8],
        expected: Option<Version>,
        committed_at: Timestamp,
    ) -> Result<Version, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let actual = match self
            .entries_db
            .get(&wtxn, key.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Some(decode_entry(key, bytes)?.version),
            None => None,
        };
        if actual != expected {
            // Dropping `wtxn` aborts the transaction.
            return Err(StoreError::VersionConflict {
                key: key.to_string(),
                expected,
                actual,
            });
        }

        let version = Version::after(expected);
        let entry = StoredEntry {
            version,
            value: value.to_vec(),
        };
        let entry_bytes = bincode::serialize(&entry).map_err(LmdbError::from)?;
        self.entries_db
            .put(&mut wtxn, key.as_bytes(), &entry_bytes)
            .map_err(LmdbError::from)?;

        let revision = HistoryEntry {
            version,
            committed_at,
            value: entry.value,
        };
        let revision_bytes = bincode::serialize(&revision).map_err(LmdbError::from)?;
        self.history_db
            .put(&mut wtxn, &history_key(key, version), &revision_bytes)
            .map_err(LmdbError::from)?;

        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(key, %version, "ledger entry committed");
        Ok(version)
    }
}

impl HistoryStore for LmdbLedgerStore {
    fn history_of(&self, key: &str) -> Result<History, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let prefix = history_prefix(key);
        let iter = self
            .history_db
            .prefix_iter(&rtxn, &prefix)
            .map_err(LmdbError::from)?;

        let mut entries = Vec::new();
        for item in iter {
            let (_, bytes) = item.map_err(LmdbError::from)?;
            let revision: HistoryEntry = bincode::deserialize(bytes)
                .map_err(|e| StoreError::Corruption(format!("history of '{}': {}", key, e)))?;
            entries.push(revision);
        }
        Ok(History::new(entries))
    }
}
