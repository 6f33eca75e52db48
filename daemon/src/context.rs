//! Transaction context for one daemon invocation.

use ballot_store::{AttestationError, IdentityAttestationProvider, TransactionClock};
use ballot_types::{CallerAttestation, Timestamp};

/// Wall-clock time, fixed once per invocation, plus the locally attested caller.
#[derive(Clone, Debug)]
pub struct SystemContext {
    at: Timestamp,
    caller: Option<CallerAttestation>,
}

impl SystemContext {
    pub fn new(msp_id: &str, caller_id: Option<&str>) -> Self {
        Self {
            at: Timestamp::now(),
            caller: caller_id.map(|id| CallerAttestation::new(msp_id, id)),
        }
    }
}

impl TransactionClock for SystemContext {
    fn transaction_time(&self) -> Timestamp {
        self.at
    }
}

impl IdentityAttestationProvider for SystemContext {
    fn caller_attestation(&self) -> Result<CallerAttestation, AttestationError> {
        self.caller.clone().ok_or(AttestationError::Missing)
    }
}
