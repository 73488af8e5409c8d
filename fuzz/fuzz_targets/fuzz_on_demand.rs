#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use flashjson_core::pointer::JsonPointer;

#[derive(Debug, Arbitrary)]
struct Input {
    document: Vec<u8>,
    pointer: String,
}

// Pairs arbitrary document bytes with an arbitrary pointer string. Goal: no
// panics walking a pointer against raw bytes, whether or not either side is
// well-formed.
fuzz_target!(|input: Input| {
    if let Ok(pointer) = JsonPointer::parse(&input.pointer) {
        let _ = flashjson_core::Document::parse_on_demand(&input.document, &pointer);
    }
});
