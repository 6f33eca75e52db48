//! Caller attestation supplied by the execution environment.

use serde::{Deserialize, Serialize};

/// The two opaque strings the environment attaches to every transaction.
///
/// Authentication already happened upstream; the core only hashes these into a
/// [`VoterHandle`](crate::VoterHandle) and never persists them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerAttestation {
    /// Membership service provider that vouched for the caller.
    pub msp_id: String,
    /// Caller identity within that provider (e.g. certificate subject).
    pub caller_id: String,
}

impl CallerAttestation {
    pub fn new(msp_id: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            caller_id: caller_id.into(),
        }
    }

    /// Both components must be present for a handle to be derived.
    pub fn is_complete(&self) -> bool {
        !self.msp_id.trim().is_empty() && !self.caller_id.trim().is_empty()
    }
}
