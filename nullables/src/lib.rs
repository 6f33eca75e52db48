//! Nullable infrastructure for deterministic testing.
//!
//! The ledger and the execution environment are abstracted behind traits in
//! `ballot-store`. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod context;
pub mod store;

pub use clock::NullClock;
pub use context::NullContext;
pub use store::NullLedger;
