//! Voter handle derivation.
//!
//! `handle = Blake2b-256(DOMAIN ‖ len(msp_id) as u32 LE ‖ msp_id ‖ caller_id)`
//!
//! The length prefix keeps `("ab", "c")` and `("a", "bc")` apart; the domain
//! tag keeps handles from colliding with any other Blake2b use of the same
//! strings.

use ballot_types::{CallerAttestation, VoterHandle};

use crate::hash::blake2b_256_multi;

const DOMAIN: &[u8] = b"ballot/voter-handle/v1";

/// Derive the anonymous handle for an attested caller.
pub fn derive_voter_handle(attestation: &CallerAttestation) -> VoterHandle {
    let msp = attestation.msp_id.as_bytes();
    let msp_len = (msp.len() as u32).to_le_bytes();
    VoterHandle::new(blake2b_256_multi(&[
        DOMAIN,
        &msp_len,
        msp,
        attestation.caller_id.as_bytes(),
    ]))
}
