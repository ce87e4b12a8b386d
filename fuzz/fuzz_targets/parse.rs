#![no_main]

use libfuzzer_sys::fuzz_target;
use timestamp::Timestamp;

fuzz_target!(|data: &[u8]| {
    // parsing is a total function; any input must yield a valid instant
    let ts = Timestamp::parse_bytes(data);
    assert!(ts.nanosecond() < 1_000_000_000);

    let _ = ts.format();
});
