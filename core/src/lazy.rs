//! Lazy parse mode (§4.9, resolved Open Question): materializes only the
//! outermost container's immediate shape, storing each member/element as a
//! [`NodeData::Raw`] byte range instead of recursing into it. [`Value::realize`](crate::dom::Value::realize)
//! turns a `Raw` node into its own fully parsed [`Document`] on demand.
//!
//! Grounded in the same "stop at `skip_one`'s extent" discipline
//! `skip::get_on_demand`/`find_member` already use for a single targeted
//! lookup, just applied across every member so the whole top level is
//! indexed up front without recursing into any of it. `Raw` offsets are
//! taken from the padded scratch buffer but sliced against the caller's
//! original `input`: every function `skip` calls here only scans, never
//! unescapes in place, so the two stay byte-identical over that range (the
//! same fact `Document::parse_on_demand` relies on).

use std::rc::Rc;

use crate::dom::{AllocatorKind, Document, NodeData, NodeId, SharedArena, StringData};
use crate::error::{SonicError, SonicResult};
use crate::skip;
use crate::string::unescape_in_place;

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Parses `input`'s outermost value. If it is an object or array, every
/// member/element becomes a `Raw` node spanning its own unparsed bytes;
/// anything else (there is nothing to defer) is parsed in full.
pub fn parse_lazy(input: &[u8]) -> SonicResult<Document> {
    let mut buf = input.to_vec();
    buf.resize(input.len() + crate::block::BLOCK_LEN, 0);

    let arena = SharedArena::new(AllocatorKind::Arena);
    let mut pos = 0usize;
    let first = skip::skip_whitespace(&buf, &mut pos)?;
    let root = match first {
        b'{' => parse_lazy_object(&mut buf, &mut pos, &arena)?,
        b'[' => parse_lazy_array(&mut buf, &mut pos, &arena)?,
        _ => return Document::parse(input),
    };

    let mut i = pos;
    while i < input.len() && is_ws(buf[i]) {
        i += 1;
    }
    if i != input.len() {
        return Err(SonicError::InvalidChar { offset: i });
    }

    Ok(Document::from_parts(arena, Some(Rc::from(input)), root))
}

fn parse_lazy_key(buf: &mut [u8], pos: &mut usize) -> SonicResult<String> {
    let result = unescape_in_place(buf, *pos)?;
    let bytes = &buf[result.start..result.start + result.len];
    let s = String::from_utf8(bytes.to_vec()).map_err(|_| SonicError::InvalidUtf8 { offset: result.start })?;
    *pos = result.end;
    Ok(s)
}

fn parse_lazy_object(buf: &mut [u8], pos: &mut usize, arena: &SharedArena) -> SonicResult<NodeId> {
    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
    let first = skip::skip_whitespace(buf, pos)?;
    if first == b'}' {
        return Ok(arena.alloc(NodeData::Object(pairs)));
    }

    let mut next = first;
    loop {
        if next != b'"' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }
        let key = parse_lazy_key(buf, pos)?;
        let colon = skip::skip_whitespace(buf, pos)?;
        if colon != b':' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }
        let value_start = skip::skip_one(buf, pos)?;
        let value_end = *pos;
        let key_id = arena.alloc(NodeData::String(StringData::Owned(Rc::from(key.as_str()))));
        let value_id = arena.alloc(NodeData::Raw { start: value_start, end: value_end });
        pairs.push((key_id, value_id));

        let sep = skip::skip_whitespace(buf, pos)?;
        match sep {
            b',' => {
                next = skip::skip_whitespace(buf, pos)?;
                continue;
            }
            b'}' => break,
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
    Ok(arena.alloc(NodeData::Object(pairs)))
}

fn parse_lazy_array(buf: &mut [u8], pos: &mut usize, arena: &SharedArena) -> SonicResult<NodeId> {
    let mut items: Vec<NodeId> = Vec::new();
    let first = skip::skip_whitespace(buf, pos)?;
    if first == b']' {
        return Ok(arena.alloc(NodeData::Array(items)));
    }
    *pos -= 1;

    loop {
        let value_start = skip::skip_one(buf, pos)?;
        let value_end = *pos;
        items.push(arena.alloc(NodeData::Raw { start: value_start, end: value_end }));

        let sep = skip::skip_whitespace(buf, pos)?;
        match sep {
            b',' => continue,
            b']' => break,
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
    Ok(arena.alloc(NodeData::Array(items)))
}

/// Fully materializes `bytes` — typically the extent a [`NodeData::Raw`]
/// node (as produced by [`parse_lazy`]) points at — into its own
/// standalone [`Document`].
pub fn realize(bytes: &[u8]) -> SonicResult<Document> {
    Document::parse(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_members_are_stored_as_raw_ranges() {
        let doc = parse_lazy(br#"{"a":1,"b":[1,2,3]}"#).unwrap();
        let root = doc.root();
        assert!(root.is_object());
        let a = root.get_key("a").unwrap();
        assert!(a.is_raw());
        assert_eq!(a.as_raw(), Some(&b"1"[..]));
        let b = root.get_key("b").unwrap();
        assert!(b.is_raw());
        assert_eq!(b.as_raw(), Some(&b"[1,2,3]"[..]));
    }

    #[test]
    fn array_elements_are_stored_as_raw_ranges() {
        let doc = parse_lazy(br#"[{"x":1},"y",3]"#).unwrap();
        let root = doc.root();
        assert!(root.is_array());
        assert_eq!(root.size(), 3);
        assert_eq!(root.get(0).unwrap().as_raw(), Some(&br#"{"x":1}"#[..]));
        assert_eq!(root.get(1).unwrap().as_raw(), Some(&br#""y""#[..]));
        assert_eq!(root.get(2).unwrap().as_raw(), Some(&b"3"[..]));
    }

    #[test]
    fn scalar_root_is_fully_materialized() {
        let doc = parse_lazy(b"42").unwrap();
        assert_eq!(doc.root().as_u64(), Some(42));
        assert!(!doc.root().is_raw());
    }

    #[test]
    fn realize_recovers_a_full_document_from_a_raw_member() {
        let doc = parse_lazy(br#"{"a":{"b":2}}"#).unwrap();
        let a = doc.root().get_key("a").unwrap();
        let realized = a.realize().unwrap();
        assert_eq!(realized.root().get_key("b").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn propagates_syntax_errors_from_deferred_members() {
        let err = parse_lazy(br#"{"a":}"#).unwrap_err();
        assert_eq!(err.error_code(), crate::error::ErrorCode::InvalidChar);
    }

    #[test]
    fn rejects_trailing_garbage_after_root_container() {
        let err = parse_lazy(b"{} x").unwrap_err();
        assert_eq!(err.error_code(), crate::error::ErrorCode::InvalidChar);
    }
}
