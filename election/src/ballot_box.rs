//! Ballot box: at most one ballot per voter handle.

use ballot_types::{Timestamp, VoterHandle};

use crate::error::{ElectionError, WindowKind};
use crate::phase::require_open;
use crate::record::{Ballot, ElectionRecord};

pub struct BallotBox;

impl BallotBox {
    /// Cast a ballot on the draft record and return a copy of it.
    ///
    /// Checks run in order: configured, voting open, voter has not voted,
    /// candidate exists. `now` is the ledger transaction time.
    pub fn cast(
        &self,
        record: Option<&mut ElectionRecord>,
        voter: VoterHandle,
        candidate_id: &str,
        now: Timestamp,
    ) -> Result<Ballot, ElectionError> {
        let record = record.ok_or(ElectionError::ElectionNotConfigured)?;
        require_open(&record.voting_window, WindowKind::Voting, now)?;

        if record.ballots.contains_key(&voter) {
            return Err(ElectionError::DuplicateVote(voter));
        }
        let candidate = record
            .candidates
            .get(candidate_id)
            .ok_or_else(|| ElectionError::UnknownCandidate(candidate_id.to_string()))?;

        let ballot = Ballot {
            voter_handle: voter,
            timestamp: now,
            candidate_snapshot: candidate.clone(),
        };
        record.ballots.insert(voter, ballot.clone());
        Ok(ballot)
    }
}
