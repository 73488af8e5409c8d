//! Schema-guided filtered parse (§4.8): parses `input` while pruning object
//! members that the `schema` document's shape doesn't mention, so a caller
//! who only cares about a handful of fields out of a wide object doesn't pay
//! to materialize the rest.
//!
//! Grounded in `dom.h`'s `internal::SchemaTraverser` idea of walking the
//! guide document in lockstep with the input, but simplified to the one
//! case that pays for itself: object members are kept only if the schema's
//! corresponding object node has a member of the same key. Arrays, and any
//! schema position that isn't itself an object, switch filtering off for
//! everything nested beneath them — matching the shape of a schema written
//! as "here are the top-level fields I want" rather than a full recursive
//! template (see DESIGN.md).

use crate::config::ParseOptions;
use crate::dom::{Document, NodeId};
use crate::error::{SonicError, SonicResult};
use crate::materializer::TreeBuilder;
use crate::number::Number;
use crate::sax::{self, Handler};

/// One open container's filtering state.
enum Guide {
    /// Keep only members whose key is present on this schema object node.
    Object(NodeId),
    /// No filtering applies anywhere in this subtree.
    Unfiltered,
}

struct SchemaHandler<'a> {
    schema: &'a Document,
    inner: TreeBuilder,
    guide_stack: Vec<Guide>,
    /// Guide to apply to the next value event, set by `on_key` when that
    /// key survives filtering. `None` at the document root, and whenever
    /// the enclosing container is `Guide::Unfiltered`.
    pending_value_guide: Option<Guide>,
    /// `Some(depth)` while discarding a rejected object member's subtree;
    /// `depth` counts nested container opens since the skip began, so the
    /// matching close is recognized even if the skipped value is itself a
    /// container.
    skip_depth: Option<u32>,
    /// Per currently-open container, how many members/elements actually
    /// survived filtering, since `TreeBuilder::on_end_object` asserts the
    /// count it's given against what it actually collected.
    accepted_counts: Vec<usize>,
}

impl<'a> SchemaHandler<'a> {
    fn new(schema: &'a Document, inner: TreeBuilder) -> Self {
        SchemaHandler {
            schema,
            inner,
            guide_stack: Vec::new(),
            pending_value_guide: None,
            skip_depth: None,
            accepted_counts: Vec::new(),
        }
    }

    /// The guide node to use for whatever value comes next, from whichever
    /// of the root, a pending object member, or an unfiltered array element
    /// is in effect.
    fn current_value_guide(&self) -> Option<NodeId> {
        match self.guide_stack.last() {
            Some(Guide::Unfiltered) => None,
            Some(Guide::Object(_)) => match &self.pending_value_guide {
                Some(Guide::Object(id)) => Some(*id),
                Some(Guide::Unfiltered) | None => None,
            },
            None => match &self.pending_value_guide {
                Some(Guide::Object(id)) => Some(*id),
                _ => None,
            },
        }
    }

    fn push_guide_for_value(&mut self) {
        let guide = match self.current_value_guide() {
            Some(schema_id) if self.schema_node(schema_id).is_object() => Guide::Object(schema_id),
            Some(_) | None => Guide::Unfiltered,
        };
        self.guide_stack.push(guide);
        self.pending_value_guide = None;
    }

    fn schema_node(&self, id: NodeId) -> crate::dom::Value<'a> {
        // Safety of lifetime: `Value` borrows `schema`, which we hold for
        // `'a`, the handler's own lifetime.
        crate::dom::Value::from_id(self.schema, id)
    }

    fn bump_accepted(&mut self) {
        if let Some(count) = self.accepted_counts.last_mut() {
            *count += 1;
        }
    }

    /// Call at the top of every scalar-event handler. Returns `true` if the
    /// event was swallowed by an in-progress skip (and, if that scalar was
    /// the whole rejected value, ends the skip).
    fn consume_if_skipping(&mut self) -> bool {
        match self.skip_depth {
            Some(0) => {
                self.skip_depth = None;
                true
            }
            Some(_) => true,
            None => false,
        }
    }
}

impl<'a> Handler for SchemaHandler<'a> {
    fn on_null(&mut self) -> SonicResult<()> {
        if self.consume_if_skipping() {
            return Ok(());
        }
        self.bump_accepted();
        self.inner.on_null()
    }

    fn on_bool(&mut self, value: bool) -> SonicResult<()> {
        if self.consume_if_skipping() {
            return Ok(());
        }
        self.bump_accepted();
        self.inner.on_bool(value)
    }

    fn on_number(&mut self, value: Number) -> SonicResult<()> {
        if self.consume_if_skipping() {
            return Ok(());
        }
        self.bump_accepted();
        self.inner.on_number(value)
    }

    fn on_string(&mut self, value: String) -> SonicResult<()> {
        if self.consume_if_skipping() {
            return Ok(());
        }
        self.bump_accepted();
        self.inner.on_string(value)
    }

    fn on_key(&mut self, key: String) -> SonicResult<()> {
        if self.skip_depth.is_some() {
            return Ok(());
        }
        match self.guide_stack.last() {
            Some(Guide::Object(schema_id)) => {
                let schema_obj = self.schema_node(*schema_id);
                match schema_obj.get_key(&key) {
                    Some(member_guide) => {
                        self.pending_value_guide = Some(Guide::Object(member_guide.node_id()));
                        self.inner.on_key(key)
                    }
                    None => {
                        self.skip_depth = Some(0);
                        Ok(())
                    }
                }
            }
            _ => {
                self.pending_value_guide = None;
                self.inner.on_key(key)
            }
        }
    }

    fn on_start_object(&mut self) -> SonicResult<()> {
        if let Some(depth) = self.skip_depth {
            self.skip_depth = Some(depth + 1);
            return Ok(());
        }
        self.push_guide_for_value();
        self.accepted_counts.push(0);
        self.inner.on_start_object()
    }

    fn on_end_object(&mut self, _pair_count: usize) -> SonicResult<()> {
        if let Some(depth) = self.skip_depth {
            debug_assert!(depth >= 1, "on_end_object without a matching on_start_object in the skip");
            self.skip_depth = if depth == 1 { None } else { Some(depth - 1) };
            return Ok(());
        }
        self.guide_stack.pop();
        let accepted = self.accepted_counts.pop().unwrap_or(0);
        self.bump_accepted();
        self.inner.on_end_object(accepted)
    }

    fn on_start_array(&mut self) -> SonicResult<()> {
        if let Some(depth) = self.skip_depth {
            self.skip_depth = Some(depth + 1);
            return Ok(());
        }
        self.push_guide_for_value();
        // Arrays are never filtered: force every element through
        // unfiltered, regardless of what the schema said about this array
        // node itself.
        *self.guide_stack.last_mut().unwrap() = Guide::Unfiltered;
        self.accepted_counts.push(0);
        self.inner.on_start_array()
    }

    fn on_end_array(&mut self, _element_count: usize) -> SonicResult<()> {
        if let Some(depth) = self.skip_depth {
            debug_assert!(depth >= 1, "on_end_array without a matching on_start_array in the skip");
            self.skip_depth = if depth == 1 { None } else { Some(depth - 1) };
            return Ok(());
        }
        self.guide_stack.pop();
        let accepted = self.accepted_counts.pop().unwrap_or(0);
        self.bump_accepted();
        self.inner.on_end_array(accepted)
    }
}

/// Parses `input`, keeping only the object members that `schema`'s shape
/// selects at each nesting level (§4.8). `schema` describes which fields to
/// keep by example: `{"a":null,"c":null}` keeps top-level `a` and `c` and
/// drops everything else; a nested object value in the schema filters that
/// member's own object the same way; arrays always pass all their elements
/// through untouched.
pub fn parse_schema(schema: &Document, input: &[u8]) -> SonicResult<Document> {
    let mut buf = input.to_vec();
    buf.resize(input.len() + crate::block::BLOCK_LEN, 0);

    let arena = crate::dom::SharedArena::new(crate::dom::AllocatorKind::Arena);
    let inner = TreeBuilder::new(arena.clone());
    let mut handler = SchemaHandler::new(schema, inner);

    let schema_root = schema.root();
    handler.pending_value_guide = Some(if schema_root.is_object() {
        Guide::Object(schema_root.node_id())
    } else {
        Guide::Unfiltered
    });

    let opts = ParseOptions::default();
    sax::parse(&mut buf, input.len(), &mut handler, &opts)?;

    let root = handler.inner.root.ok_or(SonicError::Eof { offset: input.len() })?;
    Ok(Document::from_parts(arena, Some(std::rc::Rc::from(input)), root))
}
