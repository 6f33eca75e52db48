//! Cryptographic primitives for the ballot ledger.
//!
//! - **Blake2b-256** for hashing
//! - Voter-handle derivation from caller attestations

pub mod handle;
pub mod hash;

pub use handle::derive_voter_handle;
pub use hash::{blake2b_256, blake2b_256_multi};
