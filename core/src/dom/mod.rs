//! DOM model (L4, §3.1-§3.4, §4.6, §6.4).
//!
//! [`Document`] owns the arena (and, for a freshly parsed tree, the input
//! buffer that `Copied` strings alias) plus a root [`node::NodeId`].
//! [`Value`] is a non-owning typed view used for traversal and mutation,
//! grounded in `generic_document.h`/`dynamicnode.h`'s `Document`/`Node`
//! split.

pub mod arena;
pub mod index;
pub mod node;

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Range;
use std::rc::Rc;

use crate::buffer::WriteBuffer;
use crate::config::{ParseOptions, SerializeFlags};
use crate::error::{SonicError, SonicResult};
use crate::pointer::{JsonPointer, PointerSegment};

pub use arena::{AllocatorKind, Arena, SharedArena};
pub use index::KeyIndex;
pub use node::{NodeData, NodeId, StringData};

/// A value to be inserted into a [`Document`] programmatically (§6.4's
/// `add_member`/`push_back` surface), as opposed to one produced by parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Null,
    Bool(bool),
    Uint64(u64),
    Int64(i64),
    Double(f64),
    String(String),
    Array(Vec<OwnedValue>),
    Object(Vec<(String, OwnedValue)>),
}

impl From<bool> for OwnedValue {
    fn from(v: bool) -> Self {
        OwnedValue::Bool(v)
    }
}
impl From<i64> for OwnedValue {
    fn from(v: i64) -> Self {
        OwnedValue::Int64(v)
    }
}
impl From<u64> for OwnedValue {
    fn from(v: u64) -> Self {
        OwnedValue::Uint64(v)
    }
}
impl From<f64> for OwnedValue {
    fn from(v: f64) -> Self {
        OwnedValue::Double(v)
    }
}
impl From<&str> for OwnedValue {
    fn from(v: &str) -> Self {
        OwnedValue::String(v.to_string())
    }
}
impl From<String> for OwnedValue {
    fn from(v: String) -> Self {
        OwnedValue::String(v)
    }
}

/// A materialized JSON document: an arena of nodes plus (when parsed from
/// bytes) the input buffer that `Copied` strings alias (§3.1's "a freshly
/// parsed DOM aliases the input buffer... the input buffer must outlive the
/// DOM").
#[derive(Clone)]
pub struct Document {
    pub(crate) arena: SharedArena,
    pub(crate) input: Option<Rc<[u8]>>,
    pub(crate) root: NodeId,
    /// Per-object-node key index cache (§3.3). Kept outside the arena since
    /// it is a derived structure, not canonical node data.
    pub(crate) indices: Rc<RefCell<HashMap<NodeId, KeyIndex>>>,
}

impl Document {
    pub(crate) fn from_parts(arena: SharedArena, input: Option<Rc<[u8]>>, root: NodeId) -> Self {
        Document { arena, input, root, indices: Rc::new(RefCell::new(HashMap::new())) }
    }

    /// Parses `input` (padded internally per §6.1's trailing-padding
    /// contract) into a fully materialized DOM.
    pub fn parse(input: &[u8]) -> SonicResult<Document> {
        Self::parse_with(input, ParseOptions::default())
    }

    pub fn parse_with(input: &[u8], options: ParseOptions) -> SonicResult<Document> {
        crate::materializer::parse_to_document(input, options)
    }

    /// Parses `input` using `schema` as a pruning guide (§4.8).
    pub fn parse_schema(schema: &Document, input: &[u8]) -> SonicResult<Document> {
        crate::schema::parse_schema(schema, input)
    }

    /// Parses `input`'s outermost container without recursing into its
    /// members, each of which becomes a `Raw` node realized on demand via
    /// [`Value::realize`] (§4.9).
    pub fn parse_lazy(input: &[u8]) -> SonicResult<Document> {
        crate::lazy::parse_lazy(input)
    }

    /// Walks a JSON Pointer against raw, unparsed `input`, returning only
    /// the matched byte slice (§3.4, §4.4's `get_on_demand`). This never
    /// materializes a DOM.
    pub fn parse_on_demand<'a>(input: &'a [u8], pointer: &JsonPointer) -> SonicResult<&'a [u8]> {
        let mut padded = input.to_vec();
        padded.resize(input.len() + crate::block::BLOCK_LEN, 0);
        let mut pos = 0usize;
        let start = crate::skip::get_on_demand(&padded, &mut pos, pointer)?;
        let mut end_pos = start;
        crate::skip::skip_one(&padded, &mut end_pos)?;
        Ok(&input[start..end_pos])
    }

    /// A document consisting solely of a `null` root.
    pub fn new_null() -> Document {
        let arena = SharedArena::new(AllocatorKind::System);
        let root = arena.alloc(NodeData::Null);
        Document::from_parts(arena, None, root)
    }

    /// A document whose root is an empty array.
    pub fn new_array() -> Document {
        let arena = SharedArena::new(AllocatorKind::System);
        let root = arena.alloc(NodeData::Array(Vec::new()));
        Document::from_parts(arena, None, root)
    }

    /// A document whose root is an empty object.
    pub fn new_object() -> Document {
        let arena = SharedArena::new(AllocatorKind::System);
        let root = arena.alloc(NodeData::Object(Vec::new()));
        Document::from_parts(arena, None, root)
    }

    /// Builds a document from an [`OwnedValue`] tree.
    pub fn from_owned(value: OwnedValue) -> Document {
        let arena = SharedArena::new(AllocatorKind::System);
        let root = Self::alloc_owned(&arena, value);
        Document::from_parts(arena, None, root)
    }

    fn alloc_owned(arena: &SharedArena, value: OwnedValue) -> NodeId {
        let data = match value {
            OwnedValue::Null => NodeData::Null,
            OwnedValue::Bool(b) => NodeData::Bool(b),
            OwnedValue::Uint64(u) => NodeData::Uint64(u),
            OwnedValue::Int64(i) => NodeData::Int64(i),
            OwnedValue::Double(d) => NodeData::Double(d),
            OwnedValue::String(s) => NodeData::String(StringData::Owned(Rc::from(s.as_str()))),
            OwnedValue::Array(items) => {
                let ids: Vec<NodeId> = items.into_iter().map(|v| Self::alloc_owned(arena, v)).collect();
                NodeData::Array(ids)
            }
            OwnedValue::Object(members) => {
                let pairs: Vec<(NodeId, NodeId)> = members
                    .into_iter()
                    .map(|(k, v)| {
                        let key_id = arena.alloc(NodeData::String(StringData::Owned(Rc::from(k.as_str()))));
                        let val_id = Self::alloc_owned(arena, v);
                        (key_id, val_id)
                    })
                    .collect();
                NodeData::Object(pairs)
            }
        };
        arena.alloc(data)
    }

    /// Extends this arena's lifetime with another owner, the way
    /// copy-constructing a DOM from another arena-backed DOM does (§3.2).
    /// The returned `Document` shares storage: mutating one through a
    /// container it still owns is visible through the other.
    pub fn share(&self) -> Document {
        Document {
            arena: self.arena.share(),
            input: self.input.clone(),
            root: self.root,
            indices: Rc::clone(&self.indices),
        }
    }

    pub fn root(&self) -> Value<'_> {
        Value { doc: self, id: self.root }
    }

    pub fn at_pointer(&self, pointer: &JsonPointer) -> Option<Value<'_>> {
        self.root().at_pointer(pointer)
    }

    /// Evaluates a restricted JSONPath expression (§3.4, §4.4) against this
    /// document's root, collecting every match.
    pub fn query_path(&self, path: &crate::path::JsonPath) -> Vec<Value<'_>> {
        crate::path::evaluate(self.root(), path)
    }

    pub fn serialize(&self, buf: &mut WriteBuffer, flags: SerializeFlags) -> SonicResult<()> {
        crate::serializer::serialize(self, self.root, buf, flags)
    }

    pub fn dump(&self) -> SonicResult<String> {
        let mut buf = WriteBuffer::new();
        self.serialize(&mut buf, SerializeFlags::default())?;
        Ok(buf.to_string_lossy())
    }

    pub fn input_buffer(&self) -> Option<&[u8]> {
        self.input.as_deref()
    }

    pub(crate) fn resolve_string(&self, data: &StringData) -> String {
        match data {
            StringData::Copied { start, end } => {
                let buf = self.input.as_deref().expect("Copied string without an input buffer");
                String::from_utf8_lossy(&buf[*start..*end]).into_owned()
            }
            StringData::Owned(rc) => rc.to_string(),
            StringData::Const(s) => s.to_string(),
        }
    }

    fn invalidate_index(&self, container: NodeId) {
        self.indices.borrow_mut().remove(&container);
    }
}

/// A non-owning, typed view into one node of a [`Document`] (§6.4).
#[derive(Clone, Copy)]
pub struct Value<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Value<'a> {
    /// Constructs a view onto an arbitrary node of `doc`, for callers (e.g.
    /// [`crate::schema`]) that need to inspect a guide document's nodes
    /// directly rather than through `Document::root`.
    pub(crate) fn from_id(doc: &'a Document, id: NodeId) -> Value<'a> {
        Value { doc, id }
    }

    fn with(&self, id: NodeId) -> Value<'a> {
        Value { doc: self.doc, id }
    }

    fn data(&self) -> std::cell::Ref<'a, NodeData> {
        std::cell::Ref::map(self.doc.arena.borrow(), |arena| arena.get(self.id))
    }

    pub fn node_id(&self) -> NodeId {
        self.id
    }

    // -- type predicates --------------------------------------------------

    pub fn is_null(&self) -> bool {
        matches!(*self.data(), NodeData::Null)
    }
    pub fn is_bool(&self) -> bool {
        matches!(*self.data(), NodeData::Bool(_))
    }
    pub fn is_true(&self) -> bool {
        matches!(*self.data(), NodeData::Bool(true))
    }
    pub fn is_false(&self) -> bool {
        matches!(*self.data(), NodeData::Bool(false))
    }
    pub fn is_number(&self) -> bool {
        matches!(*self.data(), NodeData::Uint64(_) | NodeData::Int64(_) | NodeData::Double(_))
    }
    pub fn is_uint64(&self) -> bool {
        matches!(*self.data(), NodeData::Uint64(_))
    }
    pub fn is_int64(&self) -> bool {
        matches!(*self.data(), NodeData::Int64(_))
    }
    pub fn is_double(&self) -> bool {
        matches!(*self.data(), NodeData::Double(_))
    }
    pub fn is_string(&self) -> bool {
        matches!(*self.data(), NodeData::String(_))
    }
    pub fn is_raw(&self) -> bool {
        matches!(*self.data(), NodeData::Raw { .. })
    }
    pub fn is_array(&self) -> bool {
        matches!(*self.data(), NodeData::Array(_))
    }
    pub fn is_object(&self) -> bool {
        matches!(*self.data(), NodeData::Object(_))
    }
    pub fn is_container(&self) -> bool {
        self.data().is_container()
    }

    pub fn type_name(&self) -> &'static str {
        self.data().type_name()
    }

    // -- getters ------------------------------------------------------------

    pub fn as_bool(&self) -> Option<bool> {
        match *self.data() {
            NodeData::Bool(b) => Some(b),
            _ => None,
        }
    }
    pub fn as_u64(&self) -> Option<u64> {
        match *self.data() {
            NodeData::Uint64(v) => Some(v),
            NodeData::Int64(v) if v >= 0 => Some(v as u64),
            _ => None,
        }
    }
    pub fn as_i64(&self) -> Option<i64> {
        match *self.data() {
            NodeData::Int64(v) => Some(v),
            NodeData::Uint64(v) if v <= i64::MAX as u64 => Some(v as i64),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match *self.data() {
            NodeData::Double(v) => Some(v),
            NodeData::Uint64(v) => Some(v as f64),
            NodeData::Int64(v) => Some(v as f64),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<String> {
        match &*self.data() {
            NodeData::String(s) => Some(self.doc.resolve_string(s)),
            _ => None,
        }
    }
    pub fn as_raw(&self) -> Option<&'a [u8]> {
        match *self.data() {
            NodeData::Raw { start, end } => self.doc.input_buffer().map(|b| &b[start..end]),
            _ => None,
        }
    }
    /// Realizes a lazily-stored `Raw` node into a fully parsed [`Value`]
    /// (§4.9). Returns the value unchanged if it is not `Raw`.
    pub fn realize(&self) -> SonicResult<Document> {
        match self.as_raw() {
            Some(bytes) => crate::lazy::realize(bytes),
            None => self.doc.root().materialize_subtree(),
        }
    }

    fn materialize_subtree(&self) -> SonicResult<Document> {
        let dumped = self.doc.dump()?;
        Document::parse(dumped.as_bytes())
    }

    // -- containers -----------------------------------------------------

    pub fn size(&self) -> usize {
        match &*self.data() {
            NodeData::Array(items) => items.len(),
            NodeData::Object(pairs) => pairs.len(),
            _ => 0,
        }
    }

    pub fn capacity(&self) -> usize {
        match &*self.data() {
            NodeData::Array(items) => items.capacity(),
            NodeData::Object(pairs) => pairs.capacity(),
            _ => 0,
        }
    }

    pub fn reserve(&self, additional: usize) {
        let mut arena = self.doc.arena.borrow_mut();
        match arena.get_mut(self.id) {
            NodeData::Array(items) => reserve_geometric(items, additional),
            NodeData::Object(pairs) => reserve_geometric(pairs, additional),
            _ => {}
        }
    }

    pub fn clear(&self) {
        {
            let mut arena = self.doc.arena.borrow_mut();
            match arena.get_mut(self.id) {
                NodeData::Array(items) => items.clear(),
                NodeData::Object(pairs) => pairs.clear(),
                _ => {}
            }
        }
        self.doc.invalidate_index(self.id);
    }

    /// Array element access by index.
    pub fn get(&self, index: usize) -> Option<Value<'a>> {
        match &*self.data() {
            NodeData::Array(items) => items.get(index).map(|&id| self.with(id)),
            _ => None,
        }
    }

    /// Object member access by key; uses the key index when one has been
    /// built via [`Value::create_map`], otherwise a linear scan (§3.3).
    pub fn get_key(&self, key: &str) -> Option<Value<'a>> {
        self.find_member(key)
    }

    pub fn find_member(&self, key: &str) -> Option<Value<'a>> {
        if let Some(idx) = self.doc.indices.borrow().get(&self.id) {
            let pos = idx.find(key)?;
            return match &*self.data() {
                NodeData::Object(pairs) => pairs.get(pos).map(|&(_, v)| self.with(v)),
                _ => None,
            };
        }
        match &*self.data() {
            NodeData::Object(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| self.doc.resolve_string(&key_string_data(self.doc, *k)) == key)
                .map(|&(_, v)| self.with(v)),
            _ => None,
        }
    }

    pub fn has_member(&self, key: &str) -> bool {
        self.find_member(key).is_some()
    }

    /// All `(key, value)` pairs of an object node, in insertion order; empty
    /// for any other node kind. Used by [`crate::path`]'s wildcard segment,
    /// which needs to visit every member positionally rather than by key.
    pub fn entries(&self) -> Vec<(String, Value<'a>)> {
        match &*self.data() {
            NodeData::Object(pairs) => pairs
                .iter()
                .map(|&(k, v)| (self.doc.resolve_string(&key_string_data(self.doc, k)), self.with(v)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Lazily builds the key index for this object node (§3.3).
    pub fn create_map(&self) {
        let pairs = match &*self.data() {
            NodeData::Object(pairs) => pairs.clone(),
            _ => return,
        };
        let keys: Vec<(String, usize)> = pairs
            .iter()
            .enumerate()
            .map(|(pos, (k, _))| (self.doc.resolve_string(&key_string_data(self.doc, *k)), pos))
            .collect();
        let index = KeyIndex::build(keys.iter().map(|(k, pos)| (k.as_str(), *pos)));
        self.doc.indices.borrow_mut().insert(self.id, index);
    }

    pub fn destroy_map(&self) {
        self.doc.invalidate_index(self.id);
    }

    pub fn has_map(&self) -> bool {
        self.doc.indices.borrow().contains_key(&self.id)
    }

    /// Appends `(key, value)` to an object node (§6.4). The key is always
    /// copied into an owned string; `copy_key` is accepted for parity with
    /// the source's `copy_key_bool` parameter but this DOM has no borrowed-
    /// key representation to opt out of (see DESIGN.md).
    pub fn add_member(&self, key: &str, value: impl Into<OwnedValue>, _copy_key: bool) -> SonicResult<()> {
        if !self.is_object() {
            return Err(SonicError::MismatchType { offset: 0 });
        }
        let key_id = self.doc.arena.alloc(NodeData::String(StringData::Owned(Rc::from(key))));
        let val_id = Document::alloc_owned(&self.doc.arena, value.into());
        {
            let mut arena = self.doc.arena.borrow_mut();
            if let NodeData::Object(pairs) = arena.get_mut(self.id) {
                pairs.push((key_id, val_id));
            }
        }
        self.doc.invalidate_index(self.id);
        Ok(())
    }

    /// Removes the last-inserted member named `key`. Returns whether a
    /// member was removed.
    pub fn remove_member(&self, key: &str) -> bool {
        let pos = {
            let arena = self.doc.arena.borrow();
            match arena.get(self.id) {
                NodeData::Object(pairs) => pairs
                    .iter()
                    .enumerate()
                    .rev()
                    .find(|(_, (k, _))| arena_resolve_key(&arena, *k).as_deref() == Some(key))
                    .map(|(pos, _)| pos),
                _ => None,
            }
        };
        let removed = match pos {
            Some(pos) => {
                let mut arena = self.doc.arena.borrow_mut();
                if let NodeData::Object(pairs) = arena.get_mut(self.id) {
                    pairs.remove(pos);
                }
                true
            }
            None => false,
        };
        if removed {
            self.doc.invalidate_index(self.id);
        }
        removed
    }

    /// Removes object members in `range` (pair-index range).
    pub fn erase_member(&self, range: Range<usize>) {
        {
            let mut arena = self.doc.arena.borrow_mut();
            if let NodeData::Object(pairs) = arena.get_mut(self.id) {
                let end = range.end.min(pairs.len());
                let start = range.start.min(end);
                pairs.drain(start..end);
            }
        }
        self.doc.invalidate_index(self.id);
    }

    pub fn push_back(&self, value: impl Into<OwnedValue>) -> SonicResult<()> {
        if !self.is_array() {
            return Err(SonicError::MismatchType { offset: 0 });
        }
        let val_id = Document::alloc_owned(&self.doc.arena, value.into());
        let mut arena = self.doc.arena.borrow_mut();
        if let NodeData::Array(items) = arena.get_mut(self.id) {
            items.push(val_id);
        }
        Ok(())
    }

    /// Overwrites this node's value in place (`SetInt64`/`SetString`/...
    /// in `dynamicnode.h`'s vocabulary, collapsed into one call since Rust's
    /// `Into<OwnedValue>` already picks the right variant). Containers keep
    /// their own `NodeId`, so any other `Value` still referring to this
    /// position through a parent sees the new data; a key index built over
    /// an enclosing object does not need invalidating, since the set of
    /// keys hasn't changed.
    pub fn set(&self, value: impl Into<OwnedValue>) {
        let new_data = match value.into() {
            OwnedValue::Null => NodeData::Null,
            OwnedValue::Bool(b) => NodeData::Bool(b),
            OwnedValue::Uint64(u) => NodeData::Uint64(u),
            OwnedValue::Int64(i) => NodeData::Int64(i),
            OwnedValue::Double(d) => NodeData::Double(d),
            OwnedValue::String(s) => NodeData::String(StringData::Owned(Rc::from(s.as_str()))),
            other @ (OwnedValue::Array(_) | OwnedValue::Object(_)) => {
                let id = Document::alloc_owned(&self.doc.arena, other);
                let data = self.doc.arena.borrow().get(id).clone();
                data
            }
        };
        *self.doc.arena.borrow_mut().get_mut(self.id) = new_data;
    }

    pub fn pop_back(&self) -> Option<()> {
        let mut arena = self.doc.arena.borrow_mut();
        if let NodeData::Array(items) = arena.get_mut(self.id) {
            items.pop().map(|_| ())
        } else {
            None
        }
    }

    /// Removes array elements in `range`.
    pub fn erase(&self, range: Range<usize>) {
        let mut arena = self.doc.arena.borrow_mut();
        if let NodeData::Array(items) = arena.get_mut(self.id) {
            let end = range.end.min(items.len());
            let start = range.start.min(end);
            items.drain(start..end);
        }
    }

    // -- navigation -------------------------------------------------------

    pub fn at_pointer(&self, pointer: &JsonPointer) -> Option<Value<'a>> {
        let mut current = *self;
        for segment in &pointer.segments {
            current = match segment {
                PointerSegment::Key(k) => current.get_key(k)?,
                PointerSegment::Index(i) => current.get(*i)?,
            };
        }
        Some(current)
    }

    pub fn serialize(&self, buf: &mut WriteBuffer, flags: SerializeFlags) -> SonicResult<()> {
        crate::serializer::serialize(self.doc, self.id, buf, flags)
    }

    pub fn dump(&self) -> SonicResult<String> {
        let mut buf = WriteBuffer::new();
        self.serialize(&mut buf, SerializeFlags::default())?;
        Ok(buf.to_string_lossy())
    }
}

/// Mirrors the spec's 1.5x-growth-with-floor-16 container capacity policy
/// (§3.1) for `reserve`, rather than relying on `Vec`'s own (roughly 2x)
/// growth strategy.
fn reserve_geometric<T>(v: &mut Vec<T>, additional: usize) {
    let needed = v.len() + additional;
    if needed <= v.capacity() {
        return;
    }
    let grown = (v.capacity() * 3 / 2).max(16);
    v.reserve(needed.max(grown) - v.len());
}

fn key_string_data(doc: &Document, key_id: NodeId) -> std::cell::Ref<'_, StringData> {
    std::cell::Ref::map(doc.arena.borrow(), |arena| match arena.get(key_id) {
        NodeData::String(s) => s,
        _ => panic!("object key node was not a string"),
    })
}

fn arena_resolve_key(arena: &Arena, key_id: NodeId) -> Option<String> {
    match arena.get(key_id) {
        NodeData::String(StringData::Const(s)) => Some(s.to_string()),
        NodeData::String(StringData::Owned(rc)) => Some(rc.to_string()),
        // `Copied` keys need the input buffer, which `remove_member` doesn't
        // have access to through `Arena` alone; such keys never match here.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programmatic_object_round_trips() {
        let doc = Document::new_object();
        doc.root().add_member("a", 1i64, true).unwrap();
        doc.root().add_member("b", "hi", true).unwrap();
        assert_eq!(doc.root().size(), 2);
        assert_eq!(doc.root().get_key("a").unwrap().as_i64(), Some(1));
        assert_eq!(doc.root().get_key("b").unwrap().as_str().as_deref(), Some("hi"));
    }

    #[test]
    fn remove_member_by_key() {
        let doc = Document::new_object();
        doc.root().add_member("a", 1i64, true).unwrap();
        doc.root().add_member("b", 2i64, true).unwrap();
        assert!(doc.root().remove_member("a"));
        assert_eq!(doc.root().size(), 1);
        assert!(doc.root().get_key("a").is_none());
    }

    #[test]
    fn push_and_pop_array() {
        let doc = Document::new_array();
        doc.root().push_back(1i64).unwrap();
        doc.root().push_back(2i64).unwrap();
        assert_eq!(doc.root().size(), 2);
        doc.root().pop_back();
        assert_eq!(doc.root().size(), 1);
        assert_eq!(doc.root().get(0).unwrap().as_i64(), Some(1));
    }

    #[test]
    fn create_map_then_find_member() {
        let doc = Document::new_object();
        doc.root().add_member("x", 1i64, true).unwrap();
        doc.root().add_member("y", 2i64, true).unwrap();
        doc.root().create_map();
        assert!(doc.root().has_map());
        assert_eq!(doc.root().find_member("y").unwrap().as_i64(), Some(2));
        doc.root().destroy_map();
        assert!(!doc.root().has_map());
    }

    #[test]
    fn add_member_invalidates_existing_map() {
        let doc = Document::new_object();
        doc.root().add_member("x", 1i64, true).unwrap();
        doc.root().create_map();
        doc.root().add_member("z", 3i64, true).unwrap();
        assert!(!doc.root().has_map());
        assert_eq!(doc.root().find_member("z").unwrap().as_i64(), Some(3));
    }

    #[test]
    fn share_extends_arena_lifetime() {
        let doc = Document::new_object();
        doc.root().add_member("a", 1i64, true).unwrap();
        let shared = doc.share();
        assert_eq!(shared.arena.strong_count(), 2);
        assert_eq!(shared.root().get_key("a").unwrap().as_i64(), Some(1));
    }

    #[test]
    fn at_pointer_navigates_nested_structure() {
        let doc = Document::parse(br#"{"a":{"b":[0,1,2]}}"#).unwrap();
        let pointer = JsonPointer::parse("/a/b/2").unwrap();
        let v = doc.at_pointer(&pointer).unwrap();
        assert_eq!(v.as_u64(), Some(2));
    }

    #[test]
    fn set_overwrites_a_scalar_node_in_place() {
        let doc = Document::parse(br#"{"a":1,"b":2}"#).unwrap();
        let a = doc.root().get_key("a").unwrap();
        assert_eq!(a.as_i64(), Some(1));
        a.set(2i64);
        assert_eq!(doc.root().get_key("a").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn dump_round_trips_simple_document() {
        let doc = Document::parse(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
        assert_eq!(doc.dump().unwrap(), r#"{"a":1,"b":[true,null,"x"]}"#);
    }
}
