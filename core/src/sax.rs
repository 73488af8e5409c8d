//! SAX-style event-driven parser (L5, §4.5).
//!
//! The driver owns the recursive descent and the buffer; a [`Handler`]
//! only reacts to events as they occur, the way `handler.h`'s
//! `SAXHandler` concept does. [`crate::materializer`] implements
//! [`Handler`] to build a [`crate::dom::Document`]; [`crate::lazy`] wraps
//! it to defer unvisited subtrees as `Raw` byte ranges instead of
//! recursing into them.

use crate::config::ParseOptions;
use crate::error::{SonicError, SonicResult};
use crate::number::{parse_number, Number};
use crate::skip::{skip_literal, skip_whitespace};
use crate::string::unescape_in_place;

/// Callback surface the parser drives as it walks a JSON document. Every
/// method may fail (e.g. a materializer's allocator, or a schema filter
/// rejecting a member) and aborts the parse.
pub trait Handler {
    fn on_null(&mut self) -> SonicResult<()>;
    fn on_bool(&mut self, value: bool) -> SonicResult<()>;
    fn on_number(&mut self, value: Number) -> SonicResult<()>;
    fn on_string(&mut self, value: String) -> SonicResult<()>;
    fn on_key(&mut self, key: String) -> SonicResult<()>;
    fn on_start_object(&mut self) -> SonicResult<()>;
    fn on_end_object(&mut self, pair_count: usize) -> SonicResult<()>;
    fn on_start_array(&mut self) -> SonicResult<()>;
    fn on_end_array(&mut self, element_count: usize) -> SonicResult<()>;
}

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Parses one complete JSON document out of `buf` (which must carry the
/// usual [`crate::block::BLOCK_LEN`] zero padding past `real_len`, per
/// §6.1), driving `handler` as it goes. Returns the offset just past the
/// last byte consumed — `real_len` on full success, per the
/// [`crate::error::ParseResult`] convention.
pub fn parse(buf: &mut [u8], real_len: usize, handler: &mut dyn Handler, opts: &ParseOptions) -> SonicResult<usize> {
    let mut pos = 0usize;
    parse_value(buf, &mut pos, handler, 0, opts)?;

    let mut i = pos;
    while i < real_len && is_ws(buf[i]) {
        i += 1;
    }
    if i != real_len {
        return Err(SonicError::InvalidChar { offset: i });
    }
    Ok(i)
}

fn parse_value(
    buf: &mut [u8],
    pos: &mut usize,
    handler: &mut dyn Handler,
    depth: usize,
    opts: &ParseOptions,
) -> SonicResult<()> {
    if depth > opts.max_depth {
        return Err(SonicError::InvalidChar { offset: *pos });
    }
    let first = skip_whitespace(buf, pos)?;
    match first {
        b'n' => {
            skip_literal(buf, pos, b'n')?;
            handler.on_null()
        }
        b't' => {
            skip_literal(buf, pos, b't')?;
            handler.on_bool(true)
        }
        b'f' => {
            skip_literal(buf, pos, b'f')?;
            handler.on_bool(false)
        }
        b'"' => {
            let s = parse_string_value(buf, pos, opts)?;
            handler.on_string(s)
        }
        b'-' | b'0'..=b'9' => {
            let value_start = *pos - 1;
            let parsed = parse_number(buf, value_start)?;
            *pos = parsed.end;
            handler.on_number(parsed.value)
        }
        b'{' => parse_object(buf, pos, handler, depth, opts),
        b'[' => parse_array(buf, pos, handler, depth, opts),
        _ => Err(SonicError::InvalidChar { offset: *pos - 1 }),
    }
}

fn parse_string_value(buf: &mut [u8], pos: &mut usize, opts: &ParseOptions) -> SonicResult<String> {
    let result = unescape_in_place(buf, *pos)?;
    let bytes = &buf[result.start..result.start + result.len];
    let s = if opts.validate_utf8 {
        String::from_utf8(bytes.to_vec()).map_err(|_| SonicError::InvalidUtf8 { offset: result.start })?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };
    *pos = result.end;
    Ok(s)
}

fn parse_object(
    buf: &mut [u8],
    pos: &mut usize,
    handler: &mut dyn Handler,
    depth: usize,
    opts: &ParseOptions,
) -> SonicResult<()> {
    handler.on_start_object()?;
    let first = skip_whitespace(buf, pos)?;
    if first == b'}' {
        return handler.on_end_object(0);
    }

    let mut next = first;
    let mut count = 0usize;
    loop {
        if next != b'"' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }
        let key = parse_string_value(buf, pos, opts)?;
        let colon = skip_whitespace(buf, pos)?;
        if colon != b':' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }
        handler.on_key(key)?;
        parse_value(buf, pos, handler, depth + 1, opts)?;
        count += 1;

        let sep = skip_whitespace(buf, pos)?;
        match sep {
            b',' => {
                next = skip_whitespace(buf, pos)?;
                continue;
            }
            b'}' => break,
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
    handler.on_end_object(count)
}

fn parse_array(
    buf: &mut [u8],
    pos: &mut usize,
    handler: &mut dyn Handler,
    depth: usize,
    opts: &ParseOptions,
) -> SonicResult<()> {
    handler.on_start_array()?;
    let first = skip_whitespace(buf, pos)?;
    if first == b']' {
        return handler.on_end_array(0);
    }
    *pos -= 1;

    let mut count = 0usize;
    loop {
        parse_value(buf, pos, handler, depth + 1, opts)?;
        count += 1;
        let sep = skip_whitespace(buf, pos)?;
        match sep {
            b',' => continue,
            b']' => break,
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
    handler.on_end_array(count)
}
