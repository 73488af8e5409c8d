//! JSON Pointer (RFC 6901), §3.4 and §4.4.
//!
//! A pointer is an ordered sequence of segments, each either an object key
//! or an array index. This module only handles the grammar and the
//! segment representation; walking a pointer against raw input bytes is
//! [`crate::skip::get_on_demand`], and walking it against a materialized
//! DOM node is the DOM's own `at_pointer`.

use crate::error::{SonicError, SonicResult};

/// One segment of a parsed pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerSegment {
    Key(String),
    Index(usize),
}

/// A parsed JSON Pointer: an ordered list of segments. The empty pointer
/// (no segments) refers to the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonPointer {
    pub segments: Vec<PointerSegment>,
}

impl JsonPointer {
    pub fn root() -> Self {
        JsonPointer { segments: Vec::new() }
    }

    /// Builds a pointer directly from caller-supplied segments (the `at_pointer(segments…)`
    /// surface in §6.4), bypassing string parsing entirely.
    pub fn from_segments(segments: Vec<PointerSegment>) -> Self {
        JsonPointer { segments }
    }

    /// Parses the RFC 6901 string form: a sequence of `/`-prefixed tokens,
    /// each with `~1` decoded to `/` and `~0` decoded to `~` (in that
    /// order, since `~01` must decode to `~1`, not `/`). The empty string
    /// is the root pointer. A bare numeric token is always treated as an
    /// array index; RFC 6901 does not define a way to force a numeric
    /// object key through this string form.
    pub fn parse(s: &str) -> SonicResult<Self> {
        if s.is_empty() {
            return Ok(JsonPointer::root());
        }
        if !s.starts_with('/') {
            return Err(SonicError::UnsupportedJsonPath {
                detail: "JSON Pointer must be empty or start with '/'".to_string(),
            });
        }
        let mut segments = Vec::new();
        for raw in s[1..].split('/') {
            let decoded = decode_token(raw);
            if decoded.chars().all(|c| c.is_ascii_digit()) && !decoded.is_empty() {
                if let Ok(idx) = decoded.parse::<usize>() {
                    segments.push(PointerSegment::Index(idx));
                    continue;
                }
            }
            segments.push(PointerSegment::Key(decoded));
        }
        Ok(JsonPointer { segments })
    }
}

fn decode_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('1') => out.push('/'),
                Some('0') => out.push('~'),
                Some(other) => {
                    out.push('~');
                    out.push(other);
                }
                None => out.push('~'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
