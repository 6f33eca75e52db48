use ballot_store::{AttestationError, StoreError};
use ballot_types::{Timestamp, VoterHandle};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which of the two configured windows an operation is gated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Candidacy,
    Voting,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::Candidacy => f.write_str("candidacy"),
            WindowKind::Voting => f.write_str("voting"),
        }
    }
}

/// Why `now` fell outside a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PhaseViolation {
    #[error("{window} period has not started yet (opens {opens_at})")]
    TooEarly {
        window: WindowKind,
        opens_at: Timestamp,
    },

    #[error("{window} period has already ended (closed {closed_at})")]
    TooLate {
        window: WindowKind,
        closed_at: Timestamp,
    },
}

#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("no election has been configured")]
    ElectionNotConfigured,

    #[error(
        "election can no longer be reconfigured: {candidates} candidate(s) and {ballots} ballot(s) recorded"
    )]
    ElectionLocked { candidates: usize, ballots: usize },

    #[error("invalid election windows: {0}")]
    InvalidWindow(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("{0}")]
    PhaseViolation(PhaseViolation),

    #[error("candidate id '{0}' is already registered")]
    DuplicateCandidateId(String),

    #[error("email '{0}' is already registered to another candidate")]
    DuplicateEmail(String),

    #[error("candidate '{0}' is not registered in this election")]
    UnknownCandidate(String),

    #[error("voter {0} has already cast a ballot")]
    DuplicateVote(VoterHandle),

    #[error("caller identity unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("election record was modified by a concurrent transaction; reload and retry")]
    ConcurrentModification,

    #[error("voting is still open; results are available after {closes_at}")]
    VotingStillOpen { closes_at: Timestamp },

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl ElectionError {
    /// Stable machine-readable code for structured failure payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ElectionNotConfigured => "election_not_configured",
            Self::ElectionLocked { .. } => "election_locked",
            Self::InvalidWindow(_) => "invalid_window",
            Self::InvalidField { .. } => "invalid_field",
            Self::PhaseViolation(PhaseViolation::TooEarly { .. }) => "phase_too_early",
            Self::PhaseViolation(PhaseViolation::TooLate { .. }) => "phase_too_late",
            Self::DuplicateCandidateId(_) => "duplicate_candidate_id",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::UnknownCandidate(_) => "unknown_candidate",
            Self::DuplicateVote(_) => "duplicate_vote",
            Self::IdentityUnavailable(_) => "identity_unavailable",
            Self::ConcurrentModification => "concurrent_modification",
            Self::VotingStillOpen { .. } => "voting_still_open",
            Self::StorageFailure(_) => "storage_failure",
        }
    }

    /// Faults the caller may clear by simply retrying the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification | Self::StorageFailure(_))
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<PhaseViolation> for ElectionError {
    fn from(v: PhaseViolation) -> Self {
        ElectionError::PhaseViolation(v)
    }
}

impl From<StoreError> for ElectionError {
    fn from(e: StoreError) -> Self {
        if e.is_conflict() {
            ElectionError::ConcurrentModification
        } else {
            ElectionError::StorageFailure(e.to_string())
        }
    }
}

impl From<AttestationError> for ElectionError {
    fn from(e: AttestationError) -> Self {
        ElectionError::IdentityUnavailable(e.to_string())
    }
}
