//! Container key-index (§3.3): an optional multimap from object member key
//! to child position, built on explicit request and consulted by lookups
//! when present.
//!
//! Grounded in `genericnode.h`'s `CreateMap`/`FindMember` pair: the index is
//! a pure cache over an object's `(key, value)` pairs, so any operation that
//! changes which pairs exist invalidates it outright rather than patching it
//! incrementally — cheaper to reason about, and matches the spec's "dropped
//! on any key-mutating operation that renders it invalid."

use std::collections::HashMap;

/// Maps an object member's key to every pair-index it appears at, in
/// insertion order. Duplicate keys are tolerated (§3.3); [`KeyIndex::find`]
/// resolves ties to the most recently inserted occurrence.
#[derive(Debug, Default, Clone)]
pub struct KeyIndex {
    positions: HashMap<String, Vec<usize>>,
}

impl KeyIndex {
    /// Builds an index over `pairs`, where each entry is `(key, pair_index)`
    /// in insertion order.
    pub fn build<'a>(pairs: impl Iterator<Item = (&'a str, usize)>) -> Self {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (key, pos) in pairs {
            positions.entry(key.to_string()).or_default().push(pos);
        }
        KeyIndex { positions }
    }

    /// The pair-index of `key`'s most recently inserted occurrence, if any.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.positions.get(key).and_then(|v| v.last().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_unique_key() {
        let idx = KeyIndex::build(vec![("a", 0), ("b", 1)].into_iter());
        assert_eq!(idx.find("a"), Some(0));
        assert_eq!(idx.find("b"), Some(1));
        assert_eq!(idx.find("c"), None);
    }

    #[test]
    fn duplicate_keys_resolve_to_latest_insertion() {
        let idx = KeyIndex::build(vec![("a", 0), ("a", 2), ("a", 5)].into_iter());
        assert_eq!(idx.find("a"), Some(5));
    }

    #[test]
    fn contains_reflects_presence() {
        let idx = KeyIndex::build(vec![("x", 0)].into_iter());
        assert!(idx.contains("x"));
        assert!(!idx.contains("y"));
    }
}
