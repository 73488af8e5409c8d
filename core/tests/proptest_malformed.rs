//! Property-based negative tests for malformed JSON.
//!
//! Validates that `Document::parse` (and the on-demand/lazy/schema entry
//! points built on top of it) **never panics** on malformed input — it must
//! return `Err(SonicError)` with some offset, not abort.
//!
//! Complements `fuzz/fuzz_targets/fuzz_parse.rs` (libfuzzer, arbitrary
//! bytes). These tests are structure-aware: every input starts as valid
//! JSON and is then corrupted in one targeted way, so they reliably reach
//! the parser's interior states instead of bouncing off the first byte.

use flashjson_core::pointer::JsonPointer;
use flashjson_core::Document;
use proptest::prelude::*;

// ===========================================================================
// 1. Deterministic negative tests — known malformed shapes
// ===========================================================================

#[test]
fn truncated_after_trailing_comma() {
    let err = Document::parse(br#"{"a":"b","#).unwrap_err();
    assert_eq!(err.error_code(), flashjson_core::ErrorCode::Eof);
}

#[test]
fn trailing_sibling_value_after_array() {
    assert!(Document::parse(br#"[1,2,3],[1,2,3]"#).is_err());
}

#[test]
fn missing_colon_between_key_and_value() {
    assert!(Document::parse(br#"{"a","b"}"#).is_err());
}

#[test]
fn unterminated_string() {
    assert!(Document::parse(br#"{"a":"b"#).is_err());
}

#[test]
fn raw_control_byte_in_string() {
    let mut input = b"\"a".to_vec();
    input.push(0x01);
    input.extend_from_slice(b"b\"");
    assert!(Document::parse(&input).is_err());
}

#[test]
fn unknown_escape_letter() {
    assert!(Document::parse(br#""a\qb""#).is_err());
}

#[test]
fn malformed_unicode_escape() {
    assert!(Document::parse(br#""\uZZZZ""#).is_err());
}

#[test]
fn unpaired_high_surrogate() {
    assert!(Document::parse(br#""\ud800""#).is_err());
}

#[test]
fn leading_zero_in_number() {
    assert!(Document::parse(b"01").is_err());
}

#[test]
fn exponent_overflows_to_infinity() {
    let err = Document::parse(b"1e400").unwrap_err();
    assert_eq!(err.error_code(), flashjson_core::ErrorCode::Infinity);
}

#[test]
fn deeply_nested_array_past_depth_limit_does_not_panic() {
    let mut input = String::new();
    for _ in 0..5000 {
        input.push('[');
    }
    // No attempt to close it: either the depth limit or the eventual Eof
    // must reject this, but parsing must return, not recurse into a stack
    // overflow.
    let _ = Document::parse(input.as_bytes());
}

#[test]
fn on_demand_pointer_walk_reports_mismatch_not_panic() {
    let pointer = JsonPointer::parse("/a/unknown").unwrap();
    let err = Document::parse_on_demand(br#"{"a":"hi"}"#, &pointer).unwrap_err();
    assert!(!err.error_code().is_success());
}

// ===========================================================================
// 2. Structure-aware fuzzing: corrupt otherwise-valid JSON one way at a time
// ===========================================================================

fn sample_documents() -> Vec<&'static str> {
    vec![
        r#"{"a":1,"b":[1,2,3],"c":{"d":"e"},"f":null,"g":true}"#,
        r#"[1,2,3,"four",5.5,true,false,null,{"a":1}]"#,
        r#""a plain string with spaces""#,
        r#"{"nested":{"deeper":{"deepest":[1,2,{"x":"y"}]}}}"#,
    ]
}

fn arb_sample() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(sample_documents())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..Default::default() })]

    /// Truncating a valid document at any byte boundary must never panic:
    /// either it's still valid (rare, e.g. trimming trailing whitespace) or
    /// it's a clean parse error.
    #[test]
    fn truncation_never_panics(doc in arb_sample(), cut in 0usize..200) {
        let bytes = doc.as_bytes();
        let cut = cut.min(bytes.len());
        let _ = Document::parse(&bytes[..cut]);
    }

    /// Deleting a single byte anywhere in a valid document must never panic.
    #[test]
    fn single_byte_deletion_never_panics(doc in arb_sample(), pos in 0usize..200) {
        let mut bytes = doc.as_bytes().to_vec();
        if !bytes.is_empty() {
            let pos = pos % bytes.len();
            bytes.remove(pos);
        }
        let _ = Document::parse(&bytes);
    }

    /// Flipping a single byte to ASCII punctuation anywhere in a valid
    /// document must never panic, whether or not the result is still valid.
    #[test]
    fn single_byte_corruption_never_panics(doc in arb_sample(), pos in 0usize..200, replacement in 0x20u8..0x7e) {
        let mut bytes = doc.as_bytes().to_vec();
        if !bytes.is_empty() {
            let pos = pos % bytes.len();
            bytes[pos] = replacement;
        }
        let _ = Document::parse(&bytes);
        let _ = Document::parse_lazy(&bytes);
    }

    /// Duplicating a slice of a valid document (simulating a repeated
    /// member or a dangling nested container) must never panic.
    #[test]
    fn duplicated_slice_never_panics(doc in arb_sample(), start in 0usize..200, len in 0usize..50) {
        let bytes = doc.as_bytes();
        let start = start.min(bytes.len());
        let len = len.min(bytes.len() - start);
        let mut corrupted = bytes.to_vec();
        corrupted.extend_from_slice(&bytes[start..start + len]);
        let _ = Document::parse(&corrupted);
    }
}
