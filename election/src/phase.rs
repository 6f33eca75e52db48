//! Phase gate: where the election stands at a given instant.
//!
//! The phase is a projection of the two windows and `now`; it is never stored,
//! so it cannot drift from the window values.
//!
//! Windows are inclusive on both ends: an operation at exactly `start` or
//! exactly `end` is accepted.

use ballot_types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{PhaseViolation, WindowKind};
use crate::record::{ElectionRecord, Window};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No election record exists.
    Unconfigured,
    /// Configured, candidacy not yet open.
    PreCandidacy,
    /// Candidate registration is open.
    Candidacy,
    /// Between candidacy end and voting start.
    InterPhase,
    /// Ballots are accepted.
    Voting,
    /// Voting has ended. Terminal.
    Closed,
}

/// Position of an instant relative to one window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPosition {
    TooEarly,
    Open,
    TooLate,
}

pub fn window_position(window: &Window, now: Timestamp) -> WindowPosition {
    if now < window.start {
        WindowPosition::TooEarly
    } else if now > window.end {
        WindowPosition::TooLate
    } else {
        WindowPosition::Open
    }
}

/// Accept `now` only inside `window`, naming which side it missed on.
pub fn require_open(
    window: &Window,
    kind: WindowKind,
    now: Timestamp,
) -> Result<(), PhaseViolation> {
    match window_position(window, now) {
        WindowPosition::Open => Ok(()),
        WindowPosition::TooEarly => Err(PhaseViolation::TooEarly {
            window: kind,
            opens_at: window.start,
        }),
        WindowPosition::TooLate => Err(PhaseViolation::TooLate {
            window: kind,
            closed_at: window.end,
        }),
    }
}

/// Total over every record state and instant.
///
/// When candidacy ends exactly where voting starts, that shared instant
/// reports `Candidacy`; both operations are still accepted there.
pub fn phase_of(record: Option<&ElectionRecord>, now: Timestamp) -> Phase {
    let Some(record) = record else {
        return Phase::Unconfigured;
    };
    match window_position(&record.candidacy_window, now) {
        WindowPosition::TooEarly => Phase::PreCandidacy,
        WindowPosition::Open => Phase::Candidacy,
        WindowPosition::TooLate => match window_position(&record.voting_window, now) {
            WindowPosition::TooEarly => Phase::InterPhase,
            WindowPosition::Open => Phase::Voting,
            WindowPosition::TooLate => Phase::Closed,
        },
    }
}
