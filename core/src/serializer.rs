//! Stack-free recursive serializer (§4.7): walks a [`crate::dom::Document`]
//! node and writes compact JSON to a [`WriteBuffer`].
//!
//! Grounded in `serialize.h`'s preflight-then-write discipline: each node
//! reserves its worst-case byte count before writing so the hot write path
//! never has to check capacity per byte. A string reserves `len * 6 + 32`
//! (every byte could become a 6-byte `\uXXXX` escape), a number reserves 33
//! (enough for any `i64`/`u64`/`f64` rendering), and a container reserves 3
//! (the opening bracket plus the one-byte close emitted via
//! [`WriteBuffer::set_last`] trick below). Trailing commas are written
//! after every child and the last one is rewritten into the closing
//! bracket, rather than checking "is this the last child" before each
//! write.

use crate::buffer::WriteBuffer;
use crate::config::{FloatFormatCutoffs, SerializeFlags};
use crate::dom::{Document, NodeData, NodeId};
use crate::error::{SonicError, SonicResult};
use crate::number::{format_f64, format_i64, format_u64};
use crate::string::quote_into;

/// Serializes the subtree rooted at `id` into `out`. Unless
/// [`SerializeFlags::APPEND_BUFFER`] is set, `out` is cleared first.
pub fn serialize(doc: &Document, id: NodeId, out: &mut WriteBuffer, flags: SerializeFlags) -> SonicResult<()> {
    if !flags.contains(SerializeFlags::APPEND_BUFFER) {
        out.clear();
    }
    serialize_node(doc, id, out, flags)
}

fn serialize_node(doc: &Document, id: NodeId, out: &mut WriteBuffer, flags: SerializeFlags) -> SonicResult<()> {
    let data = doc_node(doc, id);
    match data {
        NodeData::Null => {
            out.reserve(4);
            out.push(b"null");
            Ok(())
        }
        NodeData::Bool(b) => {
            out.reserve(5);
            out.push(if b { b"true" } else { b"false" });
            Ok(())
        }
        NodeData::Uint64(v) => {
            out.reserve(33);
            format_u64(out, v);
            Ok(())
        }
        NodeData::Int64(v) => {
            out.reserve(33);
            format_i64(out, v);
            Ok(())
        }
        NodeData::Double(v) => {
            out.reserve(33);
            format_f64(out, v, FloatFormatCutoffs::default())
        }
        NodeData::String(s) => {
            let text = doc.resolve_string(&s);
            out.reserve(text.len() * 6 + 32);
            quote_into(out, text.as_bytes(), flags)
        }
        NodeData::Raw { start, end } => {
            let buf = doc
                .input_buffer()
                .ok_or(SonicError::SerUnsupportedType { type_name: "raw" })?;
            out.push(&buf[start..end]);
            Ok(())
        }
        NodeData::Array(items) => {
            out.reserve(3);
            out.push_byte(b'[');
            if items.is_empty() {
                out.push_byte(b']');
            } else {
                for item in &items {
                    serialize_node(doc, *item, out, flags)?;
                    out.push_byte(b',');
                }
                out.set_last(b']');
            }
            Ok(())
        }
        NodeData::Object(pairs) => {
            out.reserve(3);
            out.push_byte(b'{');
            if pairs.is_empty() {
                out.push_byte(b'}');
            } else {
                for (key_id, value_id) in &pairs {
                    let key_str = match doc_node(doc, *key_id) {
                        NodeData::String(s) => doc.resolve_string(&s),
                        _ => return Err(SonicError::SerInvalidObjKey),
                    };
                    out.reserve(key_str.len() * 6 + 32);
                    quote_into(out, key_str.as_bytes(), flags)?;
                    out.push_byte(b':');
                    serialize_node(doc, *value_id, out, flags)?;
                    out.push_byte(b',');
                }
                out.set_last(b'}');
            }
            Ok(())
        }
    }
}

/// A shallow copy of the node at `id`: containers only clone their
/// `Vec<NodeId>`, not the subtrees those ids point to, so this stays cheap
/// even for a large document.
fn doc_node(doc: &Document, id: NodeId) -> NodeData {
    doc.arena.borrow().get(id).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::OwnedValue;

    fn dump(doc: &Document) -> String {
        let mut out = WriteBuffer::new();
        serialize(doc, doc.root().node_id(), &mut out, SerializeFlags::default()).unwrap();
        out.to_string_lossy()
    }

    #[test]
    fn serializes_scalars() {
        assert_eq!(dump(&Document::new_null()), "null");
        assert_eq!(dump(&Document::from_owned(OwnedValue::Bool(true))), "true");
        assert_eq!(dump(&Document::from_owned(OwnedValue::Int64(-7))), "-7");
        assert_eq!(dump(&Document::from_owned(OwnedValue::String("hi".into()))), "\"hi\"");
    }

    #[test]
    fn serializes_nested_structure() {
        let doc = Document::parse(br#"{"a":[1,2,{"b":null}],"c":"x"}"#).unwrap();
        assert_eq!(dump(&doc), r#"{"a":[1,2,{"b":null}],"c":"x"}"#);
    }

    #[test]
    fn serializes_empty_containers() {
        let doc = Document::parse(br#"{"a":[],"b":{}}"#).unwrap();
        assert_eq!(dump(&doc), r#"{"a":[],"b":{}}"#);
    }

    #[test]
    fn append_buffer_flag_preserves_existing_content() {
        let doc = Document::from_owned(OwnedValue::Int64(5));
        let mut out = WriteBuffer::new();
        out.push(b"prefix:");
        serialize(&doc, doc.root().node_id(), &mut out, SerializeFlags::APPEND_BUFFER).unwrap();
        assert_eq!(out.to_string_lossy(), "prefix:5");
    }

    #[test]
    fn escapes_string_content() {
        let doc = Document::from_owned(OwnedValue::String("a\"b\\c".into()));
        assert_eq!(dump(&doc), r#""a\"b\\c""#);
    }
}
