//! Property-based test for the parse/serialize roundtrip invariant.
//!
//! Generates arbitrary JSON-shaped trees (primitives, one level of nesting,
//! arrays of primitives), serializes each to text, reparses the text, and
//! checks the reparsed tree matches the original value-for-value.
//!
//! Invariant: for any tree built from this strategy, `parse(dump(tree)) ==
//! tree` structurally — minified serialization followed by parsing never
//! loses or reorders information for depth-bounded, non-pathological trees.

use flashjson_core::dom::{Document, OwnedValue, Value};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A JSON-safe string: printable ASCII only, so the roundtrip isn't also
/// exercising every corner of the escape/unescape engine (that's covered by
/// `string::unescape`'s own unit tests).
fn arb_json_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,12}"
}

fn arb_leaf() -> impl Strategy<Value = OwnedValue> {
    prop_oneof![
        Just(OwnedValue::Null),
        any::<bool>().prop_map(OwnedValue::Bool),
        any::<i64>().prop_map(OwnedValue::Int64),
        any::<u64>().prop_map(OwnedValue::Uint64),
        arb_json_string().prop_map(OwnedValue::String),
    ]
}

/// One level of array/object nesting around leaves, so containers are
/// exercised without the strategy recursing unboundedly.
fn arb_tree() -> impl Strategy<Value = OwnedValue> {
    let leaf = arb_leaf();
    leaf.prop_recursive(2, 16, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(OwnedValue::Array),
            proptest::collection::vec((arb_json_string(), inner), 0..6)
                .prop_map(|fields| OwnedValue::Object(dedup_keys(fields))),
        ]
    })
}

/// Later entries win on a duplicate key, matching how the parser itself
/// would see repeated object keys in source text.
fn dedup_keys(fields: Vec<(String, OwnedValue)>) -> Vec<(String, OwnedValue)> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for (k, v) in fields.into_iter().rev() {
        if seen.insert(k.clone()) {
            out.push((k, v));
        }
    }
    out.reverse();
    out
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

fn assert_same_value(expected: &OwnedValue, actual: &Value<'_>) {
    match expected {
        OwnedValue::Null => assert!(actual.is_null()),
        OwnedValue::Bool(b) => assert_eq!(actual.as_bool(), Some(*b)),
        OwnedValue::Int64(i) => assert_eq!(actual.as_i64(), Some(*i)),
        OwnedValue::Uint64(u) => assert_eq!(actual.as_u64(), Some(*u)),
        OwnedValue::Double(d) => assert_eq!(actual.as_f64(), Some(*d)),
        OwnedValue::String(s) => assert_eq!(actual.as_str().as_deref(), Some(s.as_str())),
        OwnedValue::Array(items) => {
            assert!(actual.is_array());
            assert_eq!(actual.size(), items.len());
            for (i, item) in items.iter().enumerate() {
                assert_same_value(item, &actual.get(i).unwrap());
            }
        }
        OwnedValue::Object(members) => {
            assert!(actual.is_object());
            assert_eq!(actual.size(), members.len());
            for (key, value) in members {
                let found = actual.get_key(key).unwrap_or_else(|| panic!("missing key {key:?} after roundtrip"));
                assert_same_value(value, &found);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..Default::default() })]

    /// Property: dumping an arbitrary tree and reparsing it reproduces the
    /// same values at every position.
    #[test]
    fn dump_then_parse_preserves_structure(tree in arb_tree()) {
        let original = Document::from_owned(tree.clone());
        let text = original.dump().expect("tree is always serializable");

        let reparsed = Document::parse(text.as_bytes()).expect("dumped text is always valid json");
        assert_same_value(&tree, &reparsed.root());
    }

    /// Property: dumping twice in a row (parse -> dump -> parse -> dump)
    /// produces byte-identical text the second time — minified output is a
    /// fixed point once escaping/number formatting has already happened once.
    #[test]
    fn dump_is_idempotent_after_one_round(tree in arb_tree()) {
        let original = Document::from_owned(tree);
        let first = original.dump().unwrap();
        let reparsed = Document::parse(first.as_bytes()).unwrap();
        let second = reparsed.dump().unwrap();
        prop_assert_eq!(first, second);
    }
}
