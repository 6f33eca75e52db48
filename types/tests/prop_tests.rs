use proptest::prelude::*;

use ballot_types::{Timestamp, VoterHandle};

// 2200-01-01 00:00:00; keeps the year at four digits.
const MAX_SECS: u64 = 7_258_118_400;

proptest! {
    /// Formatting then parsing a timestamp yields the same instant.
    #[test]
    fn timestamp_text_roundtrip(secs in 0u64..MAX_SECS) {
        let ts = Timestamp::new(secs);
        let parsed = Timestamp::parse(&ts.to_string()).unwrap();
        prop_assert_eq!(parsed, ts);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Text order matches numeric order inside the supported range.
    #[test]
    fn timestamp_text_sorts_like_seconds(a in 0u64..MAX_SECS, b in 0u64..MAX_SECS) {
        let (ta, tb) = (Timestamp::new(a).to_string(), Timestamp::new(b).to_string());
        prop_assert_eq!(ta.cmp(&tb), a.cmp(&b));
    }

    /// VoterHandle survives hex and bincode encoding.
    #[test]
    fn voter_handle_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let handle = VoterHandle::new(bytes);
        prop_assert_eq!(VoterHandle::from_hex(&handle.to_hex()).unwrap(), handle);
        let encoded = bincode::serialize(&handle).unwrap();
        let decoded: VoterHandle = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, handle);
    }
}
