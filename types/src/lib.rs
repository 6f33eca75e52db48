//! Fundamental types for the ballot ledger.
//!
//! Shared by every other crate in the workspace: timestamps, anonymous voter
//! handles, and the caller attestation handed over by the execution environment.

pub mod attestation;
pub mod error;
pub mod handle;
pub mod time;

pub use attestation::CallerAttestation;
pub use error::{ParseHandleError, ParseTimestampError};
pub use handle::VoterHandle;
pub use time::{Timestamp, TIMESTAMP_FORMAT};
