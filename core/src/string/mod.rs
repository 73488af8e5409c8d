//! String block engine (L1, §4.2): in-place unescape and quote-on-output.

pub mod quote;
pub mod unescape;

pub use quote::quote_into;
pub use unescape::{unescape_in_place, UnescapedString};

/// Maps an escape letter (the byte right after `\`) to its decoded byte.
/// Returns `None` for `u` (handled separately) and for anything not in the
/// JSON escape repertoire (`" \ / b f n r t`).
#[inline]
pub(crate) fn escaped_map(escape_char: u8) -> Option<u8> {
    match escape_char {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

#[inline]
pub(crate) fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
