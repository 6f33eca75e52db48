//! Optimistic concurrency over the single election entry.
//!
//! Every mutating operation loads the record with its version, applies its
//! rules to a draft, and commits the draft only if the entry is still at the
//! loaded version. Losing a race surfaces as
//! [`ElectionError::ConcurrentModification`]; nothing partial is written.

use ballot_store::{LedgerStore, Version};
use ballot_types::Timestamp;

use crate::error::ElectionError;
use crate::record::{ElectionRecord, ELECTION_KEY};

/// The record as read, with the version it was read at.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub record: Option<ElectionRecord>,
    pub version: Option<Version>,
}

pub struct ConcurrencyGuard<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> ConcurrencyGuard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Snapshot, ElectionError> {
        match self.store.get(ELECTION_KEY)? {
            None => Ok(Snapshot::default()),
            Some(stored) => Ok(Snapshot {
                record: Some(ElectionRecord::from_bytes(&stored.value)?),
                version: Some(stored.version),
            }),
        }
    }

    /// Write `draft` if the entry has not moved past `base`.
    pub fn commit(
        &self,
        base: Option<Version>,
        draft: &ElectionRecord,
        at: Timestamp,
    ) -> Result<Version, ElectionError> {
        let bytes = draft.to_bytes()?;
        self.store
            .put(ELECTION_KEY, &bytes, base, at)
            .map_err(|e| {
                if e.is_conflict() {
                    tracing::warn!(base = ?base, "election record changed underneath this transaction");
                }
                ElectionError::from(e)
            })
    }

    /// Load, let `apply` build the next record, and commit it.
    ///
    /// `apply` receives an owned draft it may freely mutate; when it returns
    /// an error nothing is written.
    pub fn update<T, F>(&self, at: Timestamp, apply: F) -> Result<(T, Version), ElectionError>
    where
        F: FnOnce(Option<ElectionRecord>) -> Result<(ElectionRecord, T), ElectionError>,
    {
        let snapshot = self.load()?;
        let (draft, out) = apply(snapshot.record)?;
        let version = self.commit(snapshot.version, &draft, at)?;
        Ok((out, version))
    }
}

/// Re-run `op` while it fails with [`ElectionError::ConcurrentModification`],
/// up to `max_attempts` runs in total. Any other outcome is returned as is.
///
/// The core never retries on its own; this is for callers sitting outside
/// a ledger transaction (the daemon, tests).
pub fn retry_on_conflict<T, F>(max_attempts: u32, mut op: F) -> Result<T, ElectionError>
where
    F: FnMut() -> Result<T, ElectionError>,
{
    let attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Err(ElectionError::ConcurrentModification) if attempt < attempts => {
                tracing::debug!(attempt, max_attempts = attempts, "retrying after version conflict");
                attempt += 1;
            }
            other => return other,
        }
    }
}
