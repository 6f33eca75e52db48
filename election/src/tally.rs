//! Tally engine: recount and rank from the ballots alone.

use std::collections::BTreeMap;

use ballot_types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;
use crate::phase::{phase_of, Phase};
use crate::record::{Candidate, ElectionRecord};

/// One row of the ranked result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub candidate: Candidate,
    pub votes: u64,
}

pub struct TallyEngine;

impl TallyEngine {
    /// Count every ballot by `candidate_snapshot.id`, ignoring any stored
    /// count. Candidates without votes are listed with zero.
    ///
    /// Order: votes descending, then candidate id ascending.
    pub fn tally(&self, record: &ElectionRecord) -> Vec<TallyEntry> {
        let mut rows: BTreeMap<&str, TallyEntry> = record
            .candidates
            .values()
            .map(|c| {
                (
                    c.id.as_str(),
                    TallyEntry {
                        candidate: c.clone(),
                        votes: 0,
                    },
                )
            })
            .collect();

        for ballot in record.ballots.values() {
            let snapshot = &ballot.candidate_snapshot;
            rows.entry(snapshot.id.as_str())
                .or_insert_with(|| TallyEntry {
                    candidate: snapshot.clone(),
                    votes: 0,
                })
                .votes += 1;
        }

        let mut ranked: Vec<TallyEntry> = rows
            .into_values()
            .map(|mut row| {
                row.candidate.vote_count = row.votes;
                row
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });
        ranked
    }

    /// Results, available only once voting has closed.
    pub fn results(
        &self,
        record: &ElectionRecord,
        now: Timestamp,
    ) -> Result<Vec<TallyEntry>, ElectionError> {
        if phase_of(Some(record), now) != Phase::Closed {
            return Err(ElectionError::VotingStillOpen {
                closes_at: record.voting_window.end,
            });
        }
        Ok(self.tally(record))
    }
}
