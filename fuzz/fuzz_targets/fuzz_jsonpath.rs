#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use flashjson_core::path::JsonPath;
use flashjson_core::Document;

#[derive(Debug, Arbitrary)]
struct Input {
    document: Vec<u8>,
    path: String,
}

// Pairs an arbitrary document with an arbitrary JSONPath expression. Goal:
// parsing the path and evaluating it against a materialized DOM never
// panics, even on expressions the grammar should reject outright.
fuzz_target!(|input: Input| {
    if let Ok(doc) = Document::parse(&input.document) {
        if let Ok(path) = JsonPath::parse(&input.path) {
            let _ = doc.query_path(&path);
        }
    }
});
