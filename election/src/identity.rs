//! Identity resolution: caller attestation to anonymous voter handle.

use ballot_crypto::derive_voter_handle;
use ballot_store::IdentityAttestationProvider;
use ballot_types::{CallerAttestation, VoterHandle};

use crate::error::ElectionError;

/// Turns the environment's caller attestation into a stable [`VoterHandle`].
///
/// Pure and deterministic: the same caller resolves to the same handle for
/// the lifetime of the ledger partition.
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn resolve(&self, attestation: &CallerAttestation) -> Result<VoterHandle, ElectionError> {
        if !attestation.is_complete() {
            return Err(ElectionError::IdentityUnavailable(
                "membership provider id and caller id are both required".into(),
            ));
        }
        Ok(derive_voter_handle(attestation))
    }

    /// Ask the environment for the current caller and resolve it.
    pub fn resolve_caller<P>(&self, provider: &P) -> Result<VoterHandle, ElectionError>
    where
        P: IdentityAttestationProvider + ?Sized,
    {
        let attestation = provider.caller_attestation()?;
        self.resolve(&attestation)
    }
}
