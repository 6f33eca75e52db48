//! Maps commands onto election operations and renders their payloads.

use ballot_election::{
    phase_of, retry_on_conflict, ConfigureElection, ElectionError, ElectionService, Phase,
};
use ballot_store::{HistoryStore, LedgerStore, TransactionContext};
use ballot_utils::format_duration;
use serde_json::{json, Value};

use crate::cli::Command;

/// Run one command. Mutating commands are retried on version conflicts up to
/// `max_attempts` times; reads run once.
pub fn dispatch<S, C>(
    service: &ElectionService<S>,
    ctx: &C,
    command: &Command,
    max_attempts: u32,
) -> Result<Value, ElectionError>
where
    S: LedgerStore + HistoryStore,
    C: TransactionContext,
{
    match command {
        Command::Configure {
            candidacy_start,
            candidacy_end,
            voting_start,
            voting_end,
        } => {
            let request = ConfigureElection {
                candidacy_start: candidacy_start.clone(),
                candidacy_end: candidacy_end.clone(),
                voting_start: voting_start.clone(),
                voting_end: voting_end.clone(),
            };
            let record = retry_on_conflict(max_attempts, || {
                service.configure_election(ctx, &request)
            })?;
            to_value(&record)
        }
        Command::RegisterCandidate { id, name, email } => {
            let candidate = retry_on_conflict(max_attempts, || {
                service.register_candidate(ctx, id, name, email)
            })?;
            to_value(&candidate)
        }
        Command::Cast { candidate_id } => {
            let ballot =
                retry_on_conflict(max_attempts, || service.cast_ballot(ctx, candidate_id))?;
            to_value(&ballot)
        }
        Command::Election => to_value(&service.view_election(ctx)?),
        Command::Candidates => to_value(&service.view_candidates()?),
        Command::Results => to_value(&service.view_results(ctx)?),
        Command::MyBallot => to_value(&service.view_own_ballot(ctx)?),
        Command::Audit => to_value(&service.audit_ballots()?),
        Command::Whoami => Ok(json!({ "voter_handle": service.whoami(ctx)? })),
        Command::Phase => phase_report(service, ctx),
    }
}

fn phase_report<S, C>(service: &ElectionService<S>, ctx: &C) -> Result<Value, ElectionError>
where
    S: LedgerStore,
    C: TransactionContext,
{
    let now = ctx.transaction_time();
    let Some(overview) = service.view_election(ctx)? else {
        return Ok(json!({ "phase": Phase::Unconfigured }));
    };
    let record = &overview.record;
    let phase = phase_of(Some(record), now);
    let next = match phase {
        Phase::PreCandidacy => Some(("candidacy opens", record.candidacy_window.start)),
        Phase::Candidacy => Some(("candidacy closes", record.candidacy_window.end)),
        Phase::InterPhase => Some(("voting opens", record.voting_window.start)),
        Phase::Voting => Some(("voting closes", record.voting_window.end)),
        Phase::Unconfigured | Phase::Closed => None,
    };
    Ok(match next {
        Some((event, at)) => json!({
            "phase": phase,
            "next": event,
            "at": at,
            "in": format_duration(at.remaining_from(now)),
        }),
        None => json!({ "phase": phase }),
    })
}

fn to_value<T: serde::Serialize>(payload: &T) -> Result<Value, ElectionError> {
    serde_json::to_value(payload)
        .map_err(|e| ElectionError::StorageFailure(format!("encode response: {e}")))
}

/// Success envelope.
pub fn success(data: Value) -> Value {
    json!({ "status": "ok", "data": data })
}

/// Structured failure envelope: stable code plus human-readable message.
pub fn failure(err: &ElectionError) -> Value {
    json!({
        "status": "error",
        "code": err.code(),
        "message": err.to_string(),
    })
}
