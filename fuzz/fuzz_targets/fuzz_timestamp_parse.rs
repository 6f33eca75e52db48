#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_types::Timestamp;

// Parsing arbitrary text never panics, and anything accepted is canonical:
// it formats back to exactly the input.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(ts) = Timestamp::parse(text) {
        assert_eq!(ts.to_string(), text);
    }
});
