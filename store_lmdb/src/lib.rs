//! LMDB storage backend for the ballot ledger.
//!
//! Implements the ledger traits from `ballot-store` using the `heed` LMDB
//! bindings. All databases live in a single environment.

pub mod environment;
pub mod error;
pub mod ledger;
pub mod meta;
pub mod migration;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use ledger::LmdbLedgerStore;
pub use meta::LmdbMetaStore;
