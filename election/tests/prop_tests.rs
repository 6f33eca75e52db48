use proptest::prelude::*;

use ballot_election::{
    Ballot, Candidate, ConfigureElection, ElectionRecord, ElectionService, ElectionWindows,
    TallyEngine, Window,
};
use ballot_nullables::{NullContext, NullLedger};
use ballot_types::{Timestamp, VoterHandle};

// 2200-01-01 00:00:00.
const MAX_SECS: u64 = 7_258_118_400;

/// Four instants with `cs < ce <= vs < ve`.
fn window_quadruple() -> impl Strategy<Value = (u64, u64, u64, u64)> {
    (0u64..MAX_SECS / 2, 1u64..1_000_000, 0u64..1_000_000, 1u64..1_000_000).prop_map(
        |(cs, candidacy_len, gap, voting_len)| {
            let ce = cs + candidacy_len;
            let vs = ce + gap;
            (cs, ce, vs, vs + voting_len)
        },
    )
}

fn record_with_votes(candidates: usize, choices: &[usize]) -> ElectionRecord {
    let mut record = ElectionRecord::new(
        ElectionWindows::new(
            Window::new(Timestamp::new(0), Timestamp::new(10)),
            Window::new(Timestamp::new(20), Timestamp::new(30)),
        )
        .unwrap(),
    );
    for i in 0..candidates {
        let id = format!("c{i:02}");
        record
            .candidates
            .insert(id.clone(), Candidate::new(&id, "Name", format!("{id}@example.org")));
    }
    for (n, choice) in choices.iter().enumerate() {
        let id = format!("c{:02}", choice % candidates);
        let mut handle = [0u8; 32];
        handle[..8].copy_from_slice(&(n as u64).to_be_bytes());
        let voter_handle = VoterHandle::new(handle);
        record.ballots.insert(
            voter_handle,
            Ballot {
                voter_handle,
                timestamp: Timestamp::new(25),
                candidate_snapshot: record.candidates[&id].clone(),
            },
        );
    }
    record
}

proptest! {
    /// Any well-ordered quadruple configures and reads back as the same text.
    #[test]
    fn valid_windows_round_trip((cs, ce, vs, ve) in window_quadruple()) {
        let text = |s: u64| Timestamp::new(s).to_string();
        let request = ConfigureElection {
            candidacy_start: text(cs),
            candidacy_end: text(ce),
            voting_start: text(vs),
            voting_end: text(ve),
        };
        let service = ElectionService::new(NullLedger::new());
        let ctx = NullContext::at(Timestamp::EPOCH);
        service.configure_election(&ctx, &request).unwrap();

        let record = service.view_election(&ctx).unwrap().unwrap().record;
        prop_assert_eq!(record.candidacy_window.start.to_string(), request.candidacy_start);
        prop_assert_eq!(record.candidacy_window.end.to_string(), request.candidacy_end);
        prop_assert_eq!(record.voting_window.start.to_string(), request.voting_start);
        prop_assert_eq!(record.voting_window.end.to_string(), request.voting_end);
    }

    /// Reversed candidacy bounds are always rejected.
    #[test]
    fn reversed_candidacy_is_invalid((cs, ce, vs, ve) in window_quadruple()) {
        let result = ElectionWindows::new(
            Window::new(Timestamp::new(ce), Timestamp::new(cs)),
            Window::new(Timestamp::new(vs), Timestamp::new(ve)),
        );
        prop_assert!(result.is_err());
    }

    /// The tally counts every ballot exactly once, lists every candidate, and
    /// is ordered by votes descending then id ascending.
    #[test]
    fn tally_invariants(
        candidates in 1usize..12,
        choices in prop::collection::vec(0usize..64, 0..200),
    ) {
        let record = record_with_votes(candidates, &choices);
        let rows = TallyEngine.tally(&record);

        prop_assert_eq!(rows.len(), candidates);
        prop_assert_eq!(rows.iter().map(|r| r.votes).sum::<u64>(), choices.len() as u64);
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.votes > b.votes || (a.votes == b.votes && a.candidate.id < b.candidate.id),
                "out of order: {:?} before {:?}", (a.candidate.id.as_str(), a.votes), (b.candidate.id.as_str(), b.votes)
            );
        }
        for row in &rows {
            prop_assert_eq!(row.candidate.vote_count, row.votes);
        }
    }
}
