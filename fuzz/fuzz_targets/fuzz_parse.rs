#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, feeds them straight to the full parser. Goal: no
// panics, no OOM from a malicious length prefix, regardless of how garbled
// the input is.
fuzz_target!(|data: &[u8]| {
    let _ = flashjson_core::Document::parse(data);
});
