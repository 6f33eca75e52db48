//! Execution-environment capabilities consumed per transaction.

use ballot_types::{CallerAttestation, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttestationError {
    #[error("no caller attestation attached to this transaction")]
    Missing,
}

/// Authoritative transaction time. Callers cannot supply it.
pub trait TransactionClock {
    fn transaction_time(&self) -> Timestamp;
}

/// Source of the already-authenticated caller identity.
pub trait IdentityAttestationProvider {
    fn caller_attestation(&self) -> Result<CallerAttestation, AttestationError>;
}

/// Everything one ledger transaction exposes to the core.
pub trait TransactionContext: TransactionClock + IdentityAttestationProvider {}

impl<T: TransactionClock + IdentityAttestationProvider> TransactionContext for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anonymous;

    impl IdentityAttestationProvider for Anonymous {
        fn caller_attestation(&self) -> Result<CallerAttestation, AttestationError> {
            Err(AttestationError::Missing)
        }
    }

    impl TransactionClock for Anonymous {
        fn transaction_time(&self) -> Timestamp {
            Timestamp::EPOCH
        }
    }

    fn attested<C: TransactionContext>(ctx: &C) -> bool {
        ctx.caller_attestation().is_ok()
    }

    #[test]
    fn missing_caller_is_the_only_attestation_fault() {
        assert!(!attested(&Anonymous));
        let err = Anonymous.caller_attestation().unwrap_err();
        assert_eq!(
            err.to_string(),
            "no caller attestation attached to this transaction"
        );
    }
}
