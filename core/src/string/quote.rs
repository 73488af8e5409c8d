//! Quote-on-output: encodes a raw byte string as a JSON string literal,
//! including the surrounding quotes (§4.2).
//!
//! Grounded in `quote.h`'s `Quote()`/`DoEscape()`/`kQuoteTab`: scan 64-byte
//! windows for the three bytes that need special handling (`"`, `\`, and any
//! raw control byte), copy clean runs verbatim, and escape one special byte
//! at a time. Bytes `>= 0x20` other than `"` and `\` are always copied
//! through unchanged, including multi-byte UTF-8 sequences, since JSON
//! string literals are UTF-8 text.

use crate::block::{control_bits, equals_bits};
use crate::buffer::WriteBuffer;
use crate::config::SerializeFlags;
use crate::error::SonicResult;

const BLOCK_LEN: usize = crate::block::BLOCK_LEN;
const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";
const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Appends `s` to `out` as a quoted JSON string (opening and closing `"`
/// included).
pub fn quote_into(out: &mut WriteBuffer, s: &[u8], flags: SerializeFlags) -> SonicResult<()> {
    out.push_byte(b'"');

    let mut pos = 0usize;
    let len = s.len();
    while pos < len {
        let remaining = len - pos;
        if remaining >= BLOCK_LEN {
            let window = &s[pos..pos + BLOCK_LEN];
            let special = equals_bits(window, b'"') | equals_bits(window, b'\\') | control_bits(window);
            if special == 0 {
                out.push(window);
                pos += BLOCK_LEN;
                continue;
            }
            let idx = special.trailing_zeros() as usize;
            out.push(&window[..idx]);
            pos += idx;
        } else {
            // Tail shorter than a full window: fall back to a byte-by-byte
            // scan for the same three special bytes.
            let tail = &s[pos..];
            let idx = tail.iter().position(|&b| b == b'"' || b == b'\\' || b < 0x20);
            match idx {
                None => {
                    out.push(tail);
                    pos = len;
                    continue;
                }
                Some(i) => {
                    out.push(&tail[..i]);
                    pos += i;
                }
            }
        }

        escape_one(out, s, &mut pos, flags);
    }

    out.push_byte(b'"');
    Ok(())
}

/// Escapes the single byte (or, for a 4-byte UTF-8 emoji sequence under
/// `ESCAPE_EMOJI`, the whole sequence) at `s[*pos]`, advancing `*pos` past
/// whatever it consumed.
fn escape_one(out: &mut WriteBuffer, s: &[u8], pos: &mut usize, flags: SerializeFlags) {
    let b = s[*pos];
    match b {
        b'"' => {
            out.push(b"\\\"");
            *pos += 1;
        }
        b'\\' => {
            out.push(b"\\\\");
            *pos += 1;
        }
        0x08 => {
            out.push(b"\\b");
            *pos += 1;
        }
        0x0c => {
            out.push(b"\\f");
            *pos += 1;
        }
        b'\n' => {
            out.push(b"\\n");
            *pos += 1;
        }
        b'\r' => {
            out.push(b"\\r");
            *pos += 1;
        }
        b'\t' => {
            out.push(b"\\t");
            *pos += 1;
        }
        0x00..=0x1f => {
            push_unicode_escape(out, b as u32, flags);
            *pos += 1;
        }
        0xf0..=0xf4 if flags.contains(SerializeFlags::ESCAPE_EMOJI) && s.len() - *pos >= 4 => {
            let cp = decode_utf8_4(&s[*pos..*pos + 4]);
            let (high, low) = to_surrogate_pair(cp);
            push_unicode_escape(out, high as u32, flags);
            push_unicode_escape(out, low as u32, flags);
            *pos += 4;
        }
        _ => {
            // Any other non-special byte reaching here is a block-scan
            // artifact (shouldn't happen: only quote/backslash/control stop
            // the scan); copy it through defensively.
            out.push_byte(b);
            *pos += 1;
        }
    }
}

fn push_unicode_escape(out: &mut WriteBuffer, code_unit: u32, flags: SerializeFlags) {
    let table = if flags.contains(SerializeFlags::UNICODE_ESCAPE_UPPERCASE) {
        HEX_UPPER
    } else {
        HEX_LOWER
    };
    out.push(b"\\u");
    out.push_byte(table[((code_unit >> 12) & 0xf) as usize]);
    out.push_byte(table[((code_unit >> 8) & 0xf) as usize]);
    out.push_byte(table[((code_unit >> 4) & 0xf) as usize]);
    out.push_byte(table[(code_unit & 0xf) as usize]);
}

/// Decodes a 4-byte UTF-8 sequence into its Unicode scalar value.
fn decode_utf8_4(bytes: &[u8]) -> u32 {
    ((bytes[0] as u32 & 0x07) << 18)
        | ((bytes[1] as u32 & 0x3f) << 12)
        | ((bytes[2] as u32 & 0x3f) << 6)
        | (bytes[3] as u32 & 0x3f)
}

/// Splits a supplementary-plane code point into its UTF-16 surrogate pair.
fn to_surrogate_pair(cp: u32) -> (u16, u16) {
    let v = cp - 0x10000;
    let high = 0xD800 + (v >> 10);
    let low = 0xDC00 + (v & 0x3ff);
    (high as u16, low as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(s: &[u8], flags: SerializeFlags) -> String {
        let mut out = WriteBuffer::new();
        quote_into(&mut out, s, flags).unwrap();
        String::from_utf8(out.into_vec()).unwrap()
    }

    #[test]
    fn plain_ascii_round_trips() {
        assert_eq!(quote(b"hello", SerializeFlags::default()), "\"hello\"");
    }

    #[test]
    fn escapes_quote_and_backslash() {
        assert_eq!(quote(br#"a"b\c"#, SerializeFlags::default()), r#""a\"b\\c""#);
    }

    #[test]
    fn escapes_named_control_bytes() {
        assert_eq!(
            quote(b"\x08\x0c\n\r\t", SerializeFlags::default()),
            r#""\b\f\n\r\t""#
        );
    }

    #[test]
    fn escapes_other_control_bytes_as_unicode() {
        assert_eq!(quote(b"\x01", SerializeFlags::default()), "\"\\u0001\"");
    }

    #[test]
    fn unicode_escape_uppercase_flag() {
        let flags = SerializeFlags::UNICODE_ESCAPE_UPPERCASE;
        assert_eq!(quote(b"\x1f", flags), "\"\\u001F\"");
    }

    #[test]
    fn raw_utf8_passes_through_by_default() {
        let s = "héllo".as_bytes();
        assert_eq!(quote(s, SerializeFlags::default()), "\"héllo\"");
    }

    #[test]
    fn emoji_escaped_as_surrogate_pair_when_flagged() {
        let emoji = "😀".as_bytes(); // U+1F600, UTF-16 surrogate pair D83D DE00
        let flags = SerializeFlags::ESCAPE_EMOJI;
        assert_eq!(quote(emoji, flags), "\"\\ud83d\\ude00\"");
    }

    #[test]
    fn emoji_left_raw_without_flag() {
        let emoji = "😀".as_bytes();
        assert_eq!(quote(emoji, SerializeFlags::default()), "\"😀\"");
    }

    #[test]
    fn long_clean_string_spans_multiple_blocks() {
        let body = "x".repeat(200);
        assert_eq!(quote(body.as_bytes(), SerializeFlags::default()), format!("\"{}\"", body));
    }

    #[test]
    fn escape_past_first_block() {
        let mut body = "x".repeat(100);
        body.push('"');
        body.push_str(&"y".repeat(10));
        let expected = format!("\"{}\\\"{}\"", "x".repeat(100), "y".repeat(10));
        assert_eq!(quote(body.as_bytes(), SerializeFlags::default()), expected);
    }
}
