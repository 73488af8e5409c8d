//! DOM materializer (§4.6): a [`crate::sax::Handler`] that builds a
//! [`crate::dom::Document`] as the parser drives it.
//!
//! Grounded in `generic_document.h`'s `ParseContext`, which tracks open
//! containers on a stack and patches each container's child list in when
//! its closing bracket arrives, rather than building containers
//! top-down. The child list itself is a plain `Vec<NodeId>`/`Vec<(NodeId,
//! NodeId)>` here instead of the source's "placeholder + patch" scheme,
//! since nothing prevents collecting children into an owned `Vec` before
//! the one `arena.alloc` call that creates the container node.

use std::rc::Rc;

use crate::config::ParseOptions;
use crate::dom::{AllocatorKind, Document, NodeData, NodeId, SharedArena, StringData};
use crate::error::{SonicError, SonicResult};
use crate::number::Number;
use crate::sax::{self, Handler};

enum Frame {
    Array(Vec<NodeId>),
    Object { pairs: Vec<(NodeId, NodeId)>, pending_key: Option<NodeId> },
}

/// The reusable "attach nodes to an open container stack, alloc the
/// container on close" core of materialization. [`crate::schema`] wraps
/// this with its own filtering decisions instead of duplicating it.
pub(crate) struct TreeBuilder {
    pub(crate) arena: SharedArena,
    stack: Vec<Frame>,
    pub(crate) root: Option<NodeId>,
}

impl TreeBuilder {
    pub(crate) fn new(arena: SharedArena) -> Self {
        TreeBuilder { arena, stack: Vec::new(), root: None }
    }

    fn attach(&mut self, id: NodeId) -> SonicResult<()> {
        match self.stack.last_mut() {
            Some(Frame::Array(items)) => {
                items.push(id);
                Ok(())
            }
            Some(Frame::Object { pairs, pending_key }) => {
                let key = pending_key.take().ok_or(SonicError::SerInvalidObjKey)?;
                pairs.push((key, id));
                Ok(())
            }
            None => {
                self.root = Some(id);
                Ok(())
            }
        }
    }

    fn alloc_scalar(&mut self, data: NodeData) -> SonicResult<()> {
        let id = self.arena.alloc(data);
        self.attach(id)
    }
}

impl Handler for TreeBuilder {
    fn on_null(&mut self) -> SonicResult<()> {
        self.alloc_scalar(NodeData::Null)
    }

    fn on_bool(&mut self, value: bool) -> SonicResult<()> {
        self.alloc_scalar(NodeData::Bool(value))
    }

    fn on_number(&mut self, value: Number) -> SonicResult<()> {
        let data = match value {
            Number::Int64(v) => NodeData::Int64(v),
            Number::Uint64(v) => NodeData::Uint64(v),
            Number::Double(v) => NodeData::Double(v),
        };
        self.alloc_scalar(data)
    }

    fn on_string(&mut self, value: String) -> SonicResult<()> {
        self.alloc_scalar(NodeData::String(StringData::Owned(Rc::from(value.as_str()))))
    }

    fn on_key(&mut self, key: String) -> SonicResult<()> {
        let id = self.arena.alloc(NodeData::String(StringData::Owned(Rc::from(key.as_str()))));
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, .. }) => {
                *pending_key = Some(id);
                Ok(())
            }
            _ => Err(SonicError::SerInvalidObjKey),
        }
    }

    fn on_start_object(&mut self) -> SonicResult<()> {
        self.stack.push(Frame::Object { pairs: Vec::new(), pending_key: None });
        Ok(())
    }

    fn on_end_object(&mut self, pair_count: usize) -> SonicResult<()> {
        match self.stack.pop() {
            Some(Frame::Object { pairs, .. }) => {
                debug_assert_eq!(pairs.len(), pair_count);
                let id = self.arena.alloc(NodeData::Object(pairs));
                self.attach(id)
            }
            _ => Err(SonicError::SerInvalidObjKey),
        }
    }

    fn on_start_array(&mut self) -> SonicResult<()> {
        self.stack.push(Frame::Array(Vec::new()));
        Ok(())
    }

    fn on_end_array(&mut self, element_count: usize) -> SonicResult<()> {
        match self.stack.pop() {
            Some(Frame::Array(items)) => {
                debug_assert_eq!(items.len(), element_count);
                let id = self.arena.alloc(NodeData::Array(items));
                self.attach(id)
            }
            _ => Err(SonicError::SerInvalidObjKey),
        }
    }
}

/// Parses `input` into a fully materialized [`Document`]. The original
/// bytes are retained on the document so later `Raw` nodes (§4.9's lazy
/// mode) can still slice into them; a full materialization never produces
/// any.
pub fn parse_to_document(input: &[u8], opts: ParseOptions) -> SonicResult<Document> {
    let mut buf = input.to_vec();
    buf.resize(input.len() + crate::block::BLOCK_LEN, 0);

    let arena = SharedArena::new(AllocatorKind::Arena);
    let mut builder = TreeBuilder::new(arena.clone());
    sax::parse(&mut buf, input.len(), &mut builder, &opts)?;

    let root = builder.root.ok_or(SonicError::Eof { offset: input.len() })?;
    Ok(Document::from_parts(arena, Some(Rc::from(input)), root))
}
