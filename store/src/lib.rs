//! Abstract ledger boundary for the ballot core.
//!
//! Every backend (LMDB, in-memory for testing) implements these traits. The
//! election core depends only on the traits, never on a backend.

pub mod env;
pub mod error;
pub mod ledger;
pub mod meta;

pub use env::{
    AttestationError, IdentityAttestationProvider, TransactionClock, TransactionContext,
};
pub use error::StoreError;
pub use ledger::{History, HistoryEntry, HistoryStore, LedgerStore, Version, VersionedValue};
pub use meta::MetaStore;
