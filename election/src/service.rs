//! Election service: the operation surface.
//!
//! Each method is one ledger transaction: it reads the transaction time (and,
//! where needed, the caller) from the context, runs the rules against the
//! single election record, and commits through the [`ConcurrencyGuard`].

use ballot_store::{
    HistoryStore, IdentityAttestationProvider, LedgerStore, TransactionClock, TransactionContext,
    Version,
};
use ballot_types::{Timestamp, VoterHandle};
use serde::{Deserialize, Serialize};

use crate::ballot_box::BallotBox;
use crate::error::ElectionError;
use crate::guard::ConcurrencyGuard;
use crate::identity::IdentityResolver;
use crate::phase::{phase_of, Phase};
use crate::record::{Ballot, Candidate, ElectionRecord, ElectionWindows, ELECTION_KEY};
use crate::registry::CandidateRegistry;
use crate::tally::{TallyEngine, TallyEntry};

/// Arguments of `configure_election`, in the textual timestamp format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureElection {
    pub candidacy_start: String,
    pub candidacy_end: String,
    pub voting_start: String,
    pub voting_end: String,
}

/// Payload of `view_election`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ElectionOverview {
    pub phase: Phase,
    /// Windows can no longer be changed.
    pub locked: bool,
    pub version: Version,
    pub record: ElectionRecord,
}

/// One committed revision of the election record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub version: Version,
    pub committed_at: Timestamp,
    pub candidates: usize,
    pub ballots: usize,
    pub added_candidates: Vec<String>,
    pub added_ballots: Vec<VoterHandle>,
    /// The windows differ from the previous revision.
    pub reconfigured: bool,
}

pub struct ElectionService<S> {
    store: S,
}

impl<S: LedgerStore> ElectionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn guard(&self) -> ConcurrencyGuard<'_, S> {
        ConcurrencyGuard::new(&self.store)
    }

    /// Create the election, or replace its windows while nobody has
    /// registered or voted yet.
    pub fn configure_election<C>(
        &self,
        ctx: &C,
        request: &ConfigureElection,
    ) -> Result<ElectionRecord, ElectionError>
    where
        C: TransactionClock + ?Sized,
    {
        let now = ctx.transaction_time();
        let result = ElectionWindows::parse(
            &request.candidacy_start,
            &request.candidacy_end,
            &request.voting_start,
            &request.voting_end,
        )
        .and_then(|windows| {
            self.guard().update(now, |current| {
                let record = match current {
                    None => ElectionRecord::new(windows),
                    Some(mut record) => {
                        record.reconfigure(windows)?;
                        record
                    }
                };
                Ok((record.clone(), record))
            })
        });

        match result {
            Ok((record, version)) => {
                tracing::info!(
                    %version,
                    candidacy_start = %record.candidacy_window.start,
                    voting_end = %record.voting_window.end,
                    "election configured"
                );
                Ok(record)
            }
            Err(e) => Err(rejected("configure_election", e)),
        }
    }

    pub fn register_candidate<C>(
        &self,
        ctx: &C,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<Candidate, ElectionError>
    where
        C: TransactionClock + ?Sized,
    {
        let now = ctx.transaction_time();
        let candidate = Candidate::new(id, name, email);
        let result = self.guard().update(now, |current| {
            let mut record = current;
            CandidateRegistry.register(record.as_mut(), candidate.clone(), now)?;
            let record = record.ok_or(ElectionError::ElectionNotConfigured)?;
            Ok((record, candidate))
        });

        match result {
            Ok((candidate, version)) => {
                tracing::info!(%version, candidate = %candidate.id, "candidate registered");
                Ok(candidate)
            }
            Err(e) => Err(rejected("register_candidate", e)),
        }
    }

    /// Cast the caller's ballot. The voter is never named explicitly; it is
    /// resolved from the transaction's attestation.
    pub fn cast_ballot<C>(&self, ctx: &C, candidate_id: &str) -> Result<Ballot, ElectionError>
    where
        C: TransactionContext + ?Sized,
    {
        let now = ctx.transaction_time();
        let result = IdentityResolver.resolve_caller(ctx).and_then(|voter| {
            self.guard().update(now, |current| {
                let mut record = current;
                let ballot = BallotBox.cast(record.as_mut(), voter, candidate_id, now)?;
                let record = record.ok_or(ElectionError::ElectionNotConfigured)?;
                Ok((record, ballot))
            })
        });

        match result {
            Ok((ballot, version)) => {
                tracing::info!(%version, voter = ?ballot.voter_handle, "ballot cast");
                Ok(ballot)
            }
            Err(e) => Err(rejected("cast_ballot", e)),
        }
    }

    /// The record with its derived phase, or `None` before configuration.
    pub fn view_election<C>(&self, ctx: &C) -> Result<Option<ElectionOverview>, ElectionError>
    where
        C: TransactionClock + ?Sized,
    {
        let snapshot = self.guard().load()?;
        let (Some(record), Some(version)) = (snapshot.record, snapshot.version) else {
            return Ok(None);
        };
        Ok(Some(ElectionOverview {
            phase: phase_of(Some(&record), ctx.transaction_time()),
            locked: record.is_locked(),
            version,
            record,
        }))
    }

    /// Registered candidates ordered by id. Empty before configuration.
    pub fn view_candidates(&self) -> Result<Vec<Candidate>, ElectionError> {
        let snapshot = self.guard().load()?;
        Ok(snapshot
            .record
            .map(|r| r.candidates.into_values().collect())
            .unwrap_or_default())
    }

    /// Ranked results; only once voting has closed.
    pub fn view_results<C>(&self, ctx: &C) -> Result<Vec<TallyEntry>, ElectionError>
    where
        C: TransactionClock + ?Sized,
    {
        let record = self.require_record()?;
        TallyEngine
            .results(&record, ctx.transaction_time())
            .map_err(|e| rejected("view_results", e))
    }

    /// The caller's own ballot, if they have cast one.
    pub fn view_own_ballot<C>(&self, ctx: &C) -> Result<Option<Ballot>, ElectionError>
    where
        C: IdentityAttestationProvider + ?Sized,
    {
        let voter = IdentityResolver.resolve_caller(ctx)?;
        let record = self.require_record()?;
        Ok(record.ballot_of(&voter).cloned())
    }

    pub fn current_phase<C>(&self, ctx: &C) -> Result<Phase, ElectionError>
    where
        C: TransactionClock + ?Sized,
    {
        let snapshot = self.guard().load()?;
        Ok(phase_of(snapshot.record.as_ref(), ctx.transaction_time()))
    }

    /// The voter handle the caller resolves to.
    pub fn whoami<C>(&self, ctx: &C) -> Result<VoterHandle, ElectionError>
    where
        C: IdentityAttestationProvider + ?Sized,
    {
        IdentityResolver.resolve_caller(ctx)
    }

    fn require_record(&self) -> Result<ElectionRecord, ElectionError> {
        self.guard()
            .load()?
            .record
            .ok_or(ElectionError::ElectionNotConfigured)
    }
}

impl<S: LedgerStore + HistoryStore> ElectionService<S> {
    /// Every committed revision of the election record, oldest first.
    pub fn audit_ballots(&self) -> Result<Vec<AuditEntry>, ElectionError> {
        let mut entries = Vec::new();
        let mut previous: Option<ElectionRecord> = None;

        for revision in self.store.history_of(ELECTION_KEY)? {
            let record = ElectionRecord::from_bytes(&revision.value)?;
            let (added_candidates, added_ballots, reconfigured) = match &previous {
                None => (
                    record.candidates.keys().cloned().collect(),
                    record.ballots.keys().copied().collect(),
                    false,
                ),
                Some(prev) => (
                    record
                        .candidates
                        .keys()
                        .filter(|id| !prev.candidates.contains_key(*id))
                        .cloned()
                        .collect(),
                    record
                        .ballots
                        .keys()
                        .filter(|v| !prev.ballots.contains_key(*v))
                        .copied()
                        .collect(),
                    prev.windows() != record.windows(),
                ),
            };
            entries.push(AuditEntry {
                version: revision.version,
                committed_at: revision.committed_at,
                candidates: record.candidates.len(),
                ballots: record.ballots.len(),
                added_candidates,
                added_ballots,
                reconfigured,
            });
            previous = Some(record);
        }

        if entries.is_empty() {
            return Err(ElectionError::ElectionNotConfigured);
        }
        Ok(entries)
    }
}

fn rejected(op: &'static str, e: ElectionError) -> ElectionError {
    match &e {
        ElectionError::ConcurrentModification => {}
        ElectionError::StorageFailure(_) => {
            tracing::warn!(op, error = %e, "storage failure");
        }
        _ => tracing::debug!(op, code = e.code(), "rejected: {e}"),
    }
    e
}
