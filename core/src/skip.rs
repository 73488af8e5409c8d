//! Skip / navigation engine (L3, §4.4): value-boundary finder, container
//! matcher, whitespace skipper, and the JSON-Pointer on-demand driver.
//!
//! Every function here requires `input` to carry the same trailing
//! [`BLOCK_LEN`] zero-padding as the string engine (§6.1's input contract):
//! [`skip_string`] scans 64-byte windows the same way [`crate::string::unescape_in_place`]
//! does, for the same reason.
//!
//! `skip_container` is grounded in `skip.h`'s bracket matcher but, rather
//! than the bitmask-and-popcount balance trick over whole blocks, walks
//! byte-by-byte and hands every string literal off to [`skip_string`] —
//! simpler to verify correct by hand (no risk of miscounting brackets that
//! happen to fall inside a string), at the cost of not vectorizing over
//! clean non-string runs the way the source does.

use crate::block::{StringBlock, BLOCK_LEN};
use crate::error::{SonicError, SonicResult};
use crate::pointer::{JsonPointer, PointerSegment};
use crate::string::unescape_in_place;

/// Outcome of [`skip_string`]: whether any escape sequence was seen, so
/// callers can skip straight to a borrowed slice instead of unescaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringScan {
    Normal,
    Escaped,
}

#[inline]
fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_json_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}')
}

/// Advances `pos` past whitespace and returns the first non-whitespace
/// byte, leaving `pos` positioned just past that byte.
pub fn skip_whitespace(input: &[u8], pos: &mut usize) -> SonicResult<u8> {
    let mut i = *pos;
    while i < input.len() && is_json_whitespace(input[i]) {
        i += 1;
    }
    if i >= input.len() {
        return Err(SonicError::Eof { offset: i });
    }
    let b = input[i];
    *pos = i + 1;
    Ok(b)
}

/// Scans for the closing quote of a string literal, `pos` starting just
/// past the opening `"`. Does not decode escapes, only skips past them,
/// so it is far cheaper than [`unescape_in_place`] when the caller only
/// needs the literal's extent.
pub fn skip_string(input: &[u8], pos: &mut usize) -> SonicResult<StringScan> {
    let mut i = *pos;
    let mut saw_escape = false;
    loop {
        if i.checked_add(BLOCK_LEN).map_or(true, |end| end > input.len()) {
            return Err(SonicError::Eof { offset: *pos });
        }
        let block = StringBlock::scan(&input[i..i + BLOCK_LEN]);

        if block.has_quote_first() {
            i += block.quote_index() as usize + 1;
            *pos = i;
            return Ok(if saw_escape { StringScan::Escaped } else { StringScan::Normal });
        }
        if block.has_unescaped_control() {
            return Err(SonicError::UnescapedControl {
                offset: i + block.control_bits.trailing_zeros() as usize,
            });
        }
        if !block.has_backslash() {
            i += BLOCK_LEN;
            continue;
        }

        saw_escape = true;
        i += block.backslash_index() as usize;
        if i + 1 >= input.len() {
            return Err(SonicError::Eof { offset: i });
        }
        let escape_char = input[i + 1];
        i += if escape_char == b'u' { 6 } else { 2 };
    }
}

/// Tracks balanced `left`/`right` brackets, `pos` starting just past the
/// opening bracket, and returns once they balance back to zero.
pub fn skip_container(input: &[u8], pos: &mut usize, left: u8, right: u8) -> SonicResult<()> {
    let mut depth: u32 = 1;
    let mut i = *pos;
    while i < input.len() {
        let b = input[i];
        if b == b'"' {
            i += 1;
            skip_string(input, &mut i)?;
            continue;
        }
        if b == left {
            depth += 1;
        } else if b == right {
            depth -= 1;
            if depth == 0 {
                *pos = i + 1;
                return Ok(());
            }
        }
        i += 1;
    }
    Err(SonicError::Eof { offset: *pos })
}

/// Verifies a `true`/`false`/`null` literal, given its already-consumed
/// first byte and `pos` pointing at the second byte. The byte following
/// the literal must be a valid JSON separator or end of input.
pub fn skip_literal(input: &[u8], pos: &mut usize, first: u8) -> SonicResult<()> {
    let rest: &[u8] = match first {
        b't' => b"rue",
        b'f' => b"alse",
        b'n' => b"ull",
        _ => return Err(SonicError::InvalidChar { offset: pos.saturating_sub(1) }),
    };
    let start = *pos;
    if start + rest.len() > input.len() || &input[start..start + rest.len()] != rest {
        return Err(SonicError::InvalidChar { offset: start.saturating_sub(1) });
    }
    let end = start + rest.len();
    if end < input.len() && !is_json_separator(input[end]) {
        return Err(SonicError::InvalidChar { offset: end });
    }
    *pos = end;
    Ok(())
}

/// Advances `pos` until the next `]`, `}`, or `,` — the extent of a
/// number token, since numbers never contain those bytes.
pub fn skip_number(input: &[u8], pos: &mut usize) {
    let mut i = *pos;
    while i < input.len() && !matches!(input[i], b']' | b'}' | b',') {
        i += 1;
    }
    *pos = i;
}

/// Skips leading whitespace then one complete JSON value, dispatching on
/// its first byte. Returns the offset of the value's first byte.
pub fn skip_one(input: &[u8], pos: &mut usize) -> SonicResult<usize> {
    let first = skip_whitespace(input, pos)?;
    let value_start = *pos - 1;
    match first {
        b'"' => {
            skip_string(input, pos)?;
        }
        b'{' => {
            skip_container(input, pos, b'{', b'}')?;
        }
        b'[' => {
            skip_container(input, pos, b'[', b']')?;
        }
        b't' | b'f' | b'n' => {
            skip_literal(input, pos, first)?;
        }
        b'-' | b'0'..=b'9' => {
            skip_number(input, pos);
        }
        _ => return Err(SonicError::InvalidChar { offset: value_start }),
    }
    Ok(value_start)
}

/// Skips `n` array elements and the commas between them, `pos` starting
/// just past the opening `[`. Returns the (unconsumed) start offset of
/// element `n`, so the caller can then parse or skip it separately.
pub fn get_array_elem(input: &[u8], pos: &mut usize, n: usize) -> SonicResult<usize> {
    for _ in 0..n {
        let b = skip_whitespace(input, pos)?;
        if b == b']' {
            return Err(SonicError::ArrIndexOutOfRange { offset: *pos - 1, index: n });
        }
        *pos -= 1;
        skip_one(input, pos)?;
        let sep = skip_whitespace(input, pos)?;
        match sep {
            b',' => {}
            b']' => return Err(SonicError::ArrIndexOutOfRange { offset: *pos - 1, index: n }),
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
    let b = skip_whitespace(input, pos)?;
    if b == b']' {
        return Err(SonicError::ArrIndexOutOfRange { offset: *pos - 1, index: n });
    }
    *pos -= 1;
    Ok(*pos)
}

/// Scans object members looking for `target`, `pos` starting just past
/// the opening `{`. On success, `pos` is left at the (unconsumed) start of
/// the matching value.
fn find_member(input: &[u8], pos: &mut usize, target: &str) -> SonicResult<()> {
    loop {
        let b = skip_whitespace(input, pos)?;
        if b == b'}' {
            return Err(SonicError::UnknownObjKey { offset: *pos - 1, key: target.to_string() });
        }
        if b != b'"' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }
        let key_start = *pos;
        let scan = skip_string(input, pos)?;
        let key_end = *pos - 1;

        let key_matches = match scan {
            StringScan::Normal => &input[key_start..key_end] == target.as_bytes(),
            StringScan::Escaped => {
                let mut scratch = input[key_start..key_end].to_vec();
                let unescaped = unescape_in_place_key(&mut scratch)?;
                unescaped == target.as_bytes()
            }
        };

        let colon = skip_whitespace(input, pos)?;
        if colon != b':' {
            return Err(SonicError::InvalidChar { offset: *pos - 1 });
        }

        if key_matches {
            let vb = skip_whitespace(input, pos)?;
            let _ = vb;
            *pos -= 1;
            return Ok(());
        }

        skip_one(input, pos)?;
        let sep = skip_whitespace(input, pos)?;
        match sep {
            b',' => continue,
            b'}' => return Err(SonicError::UnknownObjKey { offset: *pos - 1, key: target.to_string() }),
            _ => return Err(SonicError::InvalidChar { offset: *pos - 1 }),
        }
    }
}

/// Unescapes a key whose closing quote was already stripped off by the
/// caller, re-adding a synthetic terminator so [`unescape_in_place`]'s
/// quote-seeking loop still has one to find.
fn unescape_in_place_key(scratch: &mut Vec<u8>) -> SonicResult<Vec<u8>> {
    scratch.push(b'"');
    scratch.resize(scratch.len() + BLOCK_LEN, 0);
    let result = unescape_in_place(scratch, 0)?;
    Ok(scratch[result.start..result.start + result.len].to_vec())
}

/// Walks a JSON Pointer against raw input, `pos` starting at the document
/// root (before any leading whitespace). Returns the (unconsumed) start
/// offset of the pointed-to value.
pub fn get_on_demand(input: &[u8], pos: &mut usize, pointer: &JsonPointer) -> SonicResult<usize> {
    for segment in &pointer.segments {
        let b = skip_whitespace(input, pos)?;
        match segment {
            PointerSegment::Key(key) => {
                if b != b'{' {
                    return Err(SonicError::MismatchType { offset: *pos - 1 });
                }
                find_member(input, pos, key)?;
            }
            PointerSegment::Index(idx) => {
                if b != b'[' {
                    return Err(SonicError::MismatchType { offset: *pos - 1 });
                }
                let start = get_array_elem(input, pos, *idx)?;
                *pos = start;
            }
        }
    }
    let b = skip_whitespace(input, pos)?;
    let _ = b;
    *pos -= 1;
    Ok(*pos)
}
