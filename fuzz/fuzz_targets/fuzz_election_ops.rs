#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ballot_election::{ConfigureElection, ElectionService, TallyEngine};
use ballot_nullables::{NullContext, NullLedger};
use ballot_types::Timestamp;

#[derive(Arbitrary, Debug)]
enum Op {
    Configure { gaps: [u16; 4] },
    Register { id: u8, email: u8 },
    Cast { voter: u8, candidate: u8 },
    Advance { secs: u16 },
}

// Arbitrary operation sequences keep the record's invariants: at most one
// ballot per voter and a tally that accounts for every ballot.
fuzz_target!(|ops: Vec<Op>| {
    let service = ElectionService::new(NullLedger::new());
    let mut now = Timestamp::new(1_700_000_000);

    for op in ops.iter().take(256) {
        let ctx = NullContext::at(now);
        match op {
            Op::Configure { gaps } => {
                let mut at = now;
                let [cs, ce, vs, ve] = gaps.map(|gap| {
                    at = at.plus_secs(u64::from(gap));
                    at.to_string()
                });
                let request = ConfigureElection {
                    candidacy_start: cs,
                    candidacy_end: ce,
                    voting_start: vs,
                    voting_end: ve,
                };
                let _ = service.configure_election(&ctx, &request);
            }
            Op::Register { id, email } => {
                let _ = service.register_candidate(
                    &ctx,
                    &format!("c{id}"),
                    "Candidate",
                    &format!("user{email}@example.org"),
                );
            }
            Op::Cast { voter, candidate } => {
                let ctx = ctx.as_caller("FuzzMSP", &format!("v{voter}"));
                let _ = service.cast_ballot(&ctx, &format!("c{candidate}"));
            }
            Op::Advance { secs } => now = now.plus_secs(u64::from(*secs)),
        }
    }

    if let Some(overview) = service.view_election(&NullContext::at(now)).unwrap() {
        let record = overview.record;
        for (handle, ballot) in &record.ballots {
            assert_eq!(*handle, ballot.voter_handle);
            assert!(ballot.timestamp >= record.voting_window.start);
            assert!(ballot.timestamp <= record.voting_window.end);
        }
        let counted: u64 = TallyEngine.tally(&record).iter().map(|r| r.votes).sum();
        assert_eq!(counted, record.ballots.len() as u64);
    }
});
