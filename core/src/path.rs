//! JSONPath (§3.4, §4.4): a restricted grammar covering the shapes the spec
//! keeps — `$`, `.key`, `.*`, `['quoted']`/`["quoted"]`, non-negative
//! `[int]`, and `[*]` — and nothing else. No descendant (`..`), filter
//! (`[?(...)]`), slice (`[a:b]`), or negative-index segments; `jsonpath.h`'s
//! own grammar allows negative indices but the restricted form here
//! deliberately drops them (see DESIGN.md).
//!
//! Grounded in `jsonpath.h`'s segment enum and its bracket-accepts-both-
//! quote-styles / bare-`.key`-stops-at-`.`-or-`[` parsing rules.

use crate::dom::Value;
use crate::error::{SonicError, SonicResult};

/// One parsed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
    /// `.*` or `[*]`: every member of an object, or every element of an
    /// array, whichever the value at that point happens to be.
    Wildcard,
}

/// A parsed, restricted JSONPath expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    pub segments: Vec<PathSegment>,
}

fn unsupported(detail: impl Into<String>) -> SonicError {
    SonicError::UnsupportedJsonPath { detail: detail.into() }
}

impl JsonPath {
    /// Parses a JSONPath string. Must start with `$`; anything outside the
    /// restricted grammar above is rejected with [`SonicError::UnsupportedJsonPath`].
    pub fn parse(s: &str) -> SonicResult<JsonPath> {
        let chars: Vec<char> = s.chars().collect();
        if chars.first() != Some(&'$') {
            return Err(unsupported("path must start with '$'"));
        }
        let mut pos = 1usize;
        let mut segments = Vec::new();
        while pos < chars.len() {
            match chars[pos] {
                '.' => {
                    pos += 1;
                    if chars.get(pos) == Some(&'*') {
                        pos += 1;
                        segments.push(PathSegment::Wildcard);
                    } else {
                        let start = pos;
                        while pos < chars.len() && chars[pos] != '.' && chars[pos] != '[' {
                            pos += 1;
                        }
                        if start == pos {
                            return Err(unsupported("empty '.' segment"));
                        }
                        segments.push(PathSegment::Key(chars[start..pos].iter().collect()));
                    }
                }
                '[' => {
                    pos += 1;
                    segments.push(parse_bracket_segment(&chars, &mut pos)?);
                }
                other => return Err(unsupported(format!("unexpected character '{other}'"))),
            }
        }
        Ok(JsonPath { segments })
    }
}

fn parse_bracket_segment(chars: &[char], pos: &mut usize) -> SonicResult<PathSegment> {
    match chars.get(*pos) {
        Some('\'') | Some('"') => {
            let quote = chars[*pos];
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err(unsupported("unterminated quoted bracket segment"));
            }
            let key: String = chars[start..*pos].iter().collect();
            *pos += 1; // closing quote
            expect_close_bracket(chars, pos)?;
            Ok(PathSegment::Key(key))
        }
        Some('*') => {
            *pos += 1;
            expect_close_bracket(chars, pos)?;
            Ok(PathSegment::Wildcard)
        }
        Some(c) if c.is_ascii_digit() => {
            let start = *pos;
            while *pos < chars.len() && chars[*pos].is_ascii_digit() {
                *pos += 1;
            }
            let digits: String = chars[start..*pos].iter().collect();
            expect_close_bracket(chars, pos)?;
            digits.parse::<usize>().map(PathSegment::Index).map_err(|_| unsupported("index out of range"))
        }
        Some('-') => Err(unsupported("negative array indices are not supported")),
        _ => Err(unsupported("unsupported bracket segment")),
    }
}

fn expect_close_bracket(chars: &[char], pos: &mut usize) -> SonicResult<()> {
    if chars.get(*pos) != Some(&']') {
        return Err(unsupported("expected ']'"));
    }
    *pos += 1;
    Ok(())
}

/// Evaluates `path` against `root`, collecting every match. A `Key`/`Index`
/// segment that doesn't apply to the value it's tried against (wrong
/// container kind, missing key, out-of-range index) simply drops that
/// branch rather than erroring — matching the spec's "no match" outcome
/// rather than `MismatchType`, since a path is a search, not a strict walk.
pub fn evaluate<'a>(root: Value<'a>, path: &JsonPath) -> Vec<Value<'a>> {
    let mut current = vec![root];
    for segment in &path.segments {
        let mut next = Vec::new();
        for value in current {
            match segment {
                PathSegment::Key(key) => {
                    if let Some(m) = value.get_key(key) {
                        next.push(m);
                    }
                }
                PathSegment::Index(idx) => {
                    if let Some(m) = value.get(*idx) {
                        next.push(m);
                    }
                }
                PathSegment::Wildcard => {
                    if value.is_object() {
                        next.extend(value.entries().into_iter().map(|(_, v)| v));
                    } else if value.is_array() {
                        for i in 0..value.size() {
                            if let Some(m) = value.get(i) {
                                next.push(m);
                            }
                        }
                    }
                }
            }
        }
        current = next;
    }
    current
}
