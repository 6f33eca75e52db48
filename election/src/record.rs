//! The election aggregate and its parts.
//!
//! The whole election lives in one ledger entry so that cross-entity rules
//! (window lock, uniqueness of ids, emails and voters) are always checked
//! against a single consistent snapshot.

use std::collections::BTreeMap;

use ballot_types::{Timestamp, VoterHandle};
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;

/// Ledger key of the singleton record.
pub const ELECTION_KEY: &str = "election";

/// Logical identifier stored inside the record.
pub const ELECTION_ID: &str = "election";

/// A closed time interval `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Window {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }
}

/// Both windows, validated together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionWindows {
    pub candidacy: Window,
    pub voting: Window,
}

impl ElectionWindows {
    /// Candidacy must be non-empty, voting must be non-empty, and candidacy
    /// must end no later than voting starts.
    pub fn new(candidacy: Window, voting: Window) -> Result<Self, ElectionError> {
        if candidacy.start >= candidacy.end {
            return Err(ElectionError::InvalidWindow(format!(
                "candidacy start {} must be before candidacy end {}",
                candidacy.start, candidacy.end
            )));
        }
        if voting.start >= voting.end {
            return Err(ElectionError::InvalidWindow(format!(
                "voting start {} must be before voting end {}",
                voting.start, voting.end
            )));
        }
        if candidacy.end > voting.start {
            return Err(ElectionError::InvalidWindow(format!(
                "candidacy end {} overlaps voting start {}",
                candidacy.end, voting.start
            )));
        }
        Ok(Self { candidacy, voting })
    }

    /// Parse the four textual boundaries, then validate their ordering.
    pub fn parse(
        candidacy_start: &str,
        candidacy_end: &str,
        voting_start: &str,
        voting_end: &str,
    ) -> Result<Self, ElectionError> {
        let field = |name: &'static str, text: &str| {
            Timestamp::parse(text).map_err(|e| ElectionError::invalid_field(name, e.to_string()))
        };
        let candidacy = Window::new(
            field("candidacy_start", candidacy_start)?,
            field("candidacy_end", candidacy_end)?,
        );
        let voting = Window::new(
            field("voting_start", voting_start)?,
            field("voting_end", voting_end)?,
        );
        Self::new(candidacy, voting)
    }
}

/// A registered candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Filled in by the tally; never persisted.
    #[serde(skip)]
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            vote_count: 0,
        }
    }
}

/// An immutable cast ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter_handle: VoterHandle,
    /// Ledger transaction time of the cast.
    pub timestamp: Timestamp,
    /// Copy of the candidate as it was when the ballot was cast.
    pub candidate_snapshot: Candidate,
}

/// The singleton election aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub id: String,
    pub candidacy_window: Window,
    pub voting_window: Window,
    pub candidates: BTreeMap<String, Candidate>,
    pub ballots: BTreeMap<VoterHandle, Ballot>,
}

impl ElectionRecord {
    /// A freshly configured election with no candidates and no ballots.
    pub fn new(windows: ElectionWindows) -> Self {
        Self {
            id: ELECTION_ID.to_string(),
            candidacy_window: windows.candidacy,
            voting_window: windows.voting,
            candidates: BTreeMap::new(),
            ballots: BTreeMap::new(),
        }
    }

    pub fn windows(&self) -> ElectionWindows {
        ElectionWindows {
            candidacy: self.candidacy_window,
            voting: self.voting_window,
        }
    }

    /// Windows freeze as soon as anyone has registered or voted.
    pub fn is_locked(&self) -> bool {
        !self.candidates.is_empty() || !self.ballots.is_empty()
    }

    /// Replace the windows of an election nobody has touched yet.
    pub fn reconfigure(&mut self, windows: ElectionWindows) -> Result<(), ElectionError> {
        if self.is_locked() {
            return Err(ElectionError::ElectionLocked {
                candidates: self.candidates.len(),
                ballots: self.ballots.len(),
            });
        }
        self.candidacy_window = windows.candidacy;
        self.voting_window = windows.voting;
        Ok(())
    }

    pub fn ballot_of(&self, voter: &VoterHandle) -> Option<&Ballot> {
        self.ballots.get(voter)
    }

    /// Serialize for storage (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, ElectionError> {
        bincode::serialize(self)
            .map_err(|e| ElectionError::StorageFailure(format!("encode election record: {e}")))
    }

    /// Deserialize a stored record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ElectionError> {
        bincode::deserialize(bytes)
            .map_err(|e| ElectionError::StorageFailure(format!("corrupt election record: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn windows() -> ElectionWindows {
        ElectionWindows::parse(
            "2024-01-01 10:00:00",
            "2024-01-08 23:00:00",
            "2024-07-01 10:00:00",
            "2024-07-01 23:00:00",
        )
        .unwrap()
    }

    #[test]
    fn parse_keeps_exact_boundaries() {
        let w = windows();
        assert_eq!(w.candidacy.start, ts("2024-01-01 10:00:00"));
        assert_eq!(w.voting.end.to_string(), "2024-07-01 23:00:00");
    }

    #[test]
    fn empty_windows_are_rejected() {
        let t = ts("2024-01-01 10:00:00");
        let later = t.plus_secs(60);
        let err = ElectionWindows::new(Window::new(t, t), Window::new(later, later.plus_secs(1)))
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidWindow(_)));

        let err = ElectionWindows::new(Window::new(t, later), Window::new(later, later))
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidWindow(_)));
    }

    #[test]
    fn overlapping_windows_are_rejected() {
        let err = ElectionWindows::parse(
            "2024-01-01 10:00:00",
            "2024-07-01 12:00:00",
            "2024-07-01 10:00:00",
            "2024-07-01 23:00:00",
        )
        .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidWindow(ref m) if m.contains("overlaps")));
    }

    #[test]
    fn adjacent_windows_are_allowed() {
        let w = ElectionWindows::parse(
            "2024-01-01 10:00:00",
            "2024-07-01 10:00:00",
            "2024-07-01 10:00:00",
            "2024-07-01 23:00:00",
        );
        assert!(w.is_ok());
    }

    #[test]
    fn parse_error_names_the_field() {
        let err = ElectionWindows::parse(
            "2024-01-01 10:00:00",
            "2024-01-08 23:00:00",
            "July 1st",
            "2024-07-01 23:00:00",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ElectionError::InvalidField {
                field: "voting_start",
                ..
            }
        ));
    }

    #[test]
    fn reconfigure_locks_after_registration() {
        let mut record = ElectionRecord::new(windows());
        assert!(!record.is_locked());
        record.reconfigure(windows()).unwrap();

        record
            .candidates
            .insert("c1".into(), Candidate::new("c1", "Ana", "ana@example.org"));
        let before = record.clone();
        let err = record.reconfigure(windows()).unwrap_err();
        assert!(matches!(
            err,
            ElectionError::ElectionLocked {
                candidates: 1,
                ballots: 0
            }
        ));
        assert_eq!(record, before);
    }

    #[test]
    fn bytes_round_trip_drops_vote_counts() {
        let mut record = ElectionRecord::new(windows());
        let mut candidate = Candidate::new("c1", "Ana", "ana@example.org");
        candidate.vote_count = 42;
        record.candidates.insert("c1".into(), candidate);

        let decoded = ElectionRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.candidates["c1"].vote_count, 0);
        assert_eq!(decoded.candidates["c1"].email, "ana@example.org");
        assert_eq!(decoded.windows(), record.windows());
    }

    #[test]
    fn garbage_bytes_are_a_storage_failure() {
        let err = ElectionRecord::from_bytes(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, ElectionError::StorageFailure(_)));
    }
}
