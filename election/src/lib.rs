//! Ledger-hosted election core.
//!
//! One election per ledger partition, stored as a single record under a fixed
//! key. Lifecycle: Unconfigured → PreCandidacy → Candidacy → InterPhase →
//! Voting → Closed, derived from the configured windows and the ledger's
//! transaction time.
//!
//! Key rules: windows freeze once anyone registers or votes, one ballot per
//! voter handle, results only after voting closes, ties broken by candidate id.

pub mod ballot_box;
pub mod error;
pub mod guard;
pub mod identity;
pub mod phase;
pub mod record;
pub mod registry;
pub mod service;
pub mod tally;

pub use ballot_box::BallotBox;
pub use error::{ElectionError, PhaseViolation, WindowKind};
pub use guard::{retry_on_conflict, ConcurrencyGuard, Snapshot};
pub use identity::IdentityResolver;
pub use phase::{phase_of, Phase};
pub use record::{Ballot, Candidate, ElectionRecord, ElectionWindows, Window, ELECTION_KEY};
pub use registry::CandidateRegistry;
pub use service::{AuditEntry, ConfigureElection, ElectionOverview, ElectionService};
pub use tally::{TallyEngine, TallyEntry};
