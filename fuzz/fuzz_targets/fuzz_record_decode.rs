#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_election::{ElectionRecord, TallyEngine};

// Stored bytes may be anything; decoding must fail cleanly, and whatever
// decodes must tally and re-encode without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(record) = ElectionRecord::from_bytes(data) else {
        return;
    };
    let rows = TallyEngine.tally(&record);
    let counted: u64 = rows.iter().map(|r| r.votes).sum();
    assert_eq!(counted, record.ballots.len() as u64);

    let bytes = record.to_bytes().expect("decoded record re-encodes");
    let again = ElectionRecord::from_bytes(&bytes).expect("re-encoded record decodes");
    assert_eq!(again, record);

    let _ = bincode::deserialize::<ballot_types::Timestamp>(data);
});
