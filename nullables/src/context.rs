//! Nullable transaction context: fixed time and caller per transaction.

use ballot_store::{AttestationError, IdentityAttestationProvider, TransactionClock};
use ballot_types::{CallerAttestation, Timestamp};

/// What the execution environment would hand one transaction.
#[derive(Clone, Debug)]
pub struct NullContext {
    at: Timestamp,
    caller: Option<CallerAttestation>,
}

impl NullContext {
    /// An anonymous transaction at `at` (no attestation attached).
    pub fn at(at: Timestamp) -> Self {
        Self { at, caller: None }
    }

    /// Attach a caller attestation.
    pub fn as_caller(mut self, msp_id: &str, caller_id: &str) -> Self {
        self.caller = Some(CallerAttestation::new(msp_id, caller_id));
        self
    }

    /// Same caller, different transaction time.
    pub fn with_time(&self, at: Timestamp) -> Self {
        Self {
            at,
            caller: self.caller.clone(),
        }
    }
}

impl TransactionClock for NullContext {
    fn transaction_time(&self) -> Timestamp {
        self.at
    }
}

impl IdentityAttestationProvider for NullContext {
    fn caller_attestation(&self) -> Result<CallerAttestation, AttestationError> {
        self.caller.clone().ok_or(AttestationError::Missing)
    }
}
