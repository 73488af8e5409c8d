//! Error types for parsing, serialization and on-demand navigation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// These codes are a **stable wire contract**: once published, variant names
/// and their serialized `snake_case` strings must never change. Downstream
/// consumers (CLI exit codes, bindings) match on `ErrorCode`, not on the
/// richer [`SonicError`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// Parsing completed successfully.
    None,
    /// Input ended before a value was complete.
    Eof,
    /// A byte was not legal in the current parser state.
    InvalidChar,
    /// A number overflowed to positive or negative infinity.
    Infinity,
    /// A raw control byte (`< 0x20`) appeared inside a string literal.
    UnescapedControl,
    /// An unknown `\X` escape letter was used.
    EscapedFormat,
    /// A malformed `\uXXXX` escape or surrogate pair.
    EscapedUnicode,
    /// UTF-8 validation rejected the byte sequence.
    InvalidUtf8,
    /// On-demand lookup: the requested object key does not exist.
    UnknownObjKey,
    /// On-demand lookup: the requested array index is past the end.
    ArrIndexOutOfRange,
    /// On-demand lookup: tried to index into an object, or key into an array.
    MismatchType,
    /// The JSONPath expression used a construct this engine does not support.
    UnsupportedJsonPath,
    /// The DOM contained a node type the serializer cannot emit.
    SerUnsupportedType,
    /// Attempted to serialize a non-finite double.
    SerInfinity,
    /// An object's key node was not a string.
    SerInvalidObjKey,
    /// The allocator could not satisfy a request.
    NoMem,
}

impl ErrorCode {
    /// `true` iff this code represents a successful parse.
    pub fn is_success(self) -> bool {
        matches!(self, ErrorCode::None)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ErrorCode::None => "success",
            ErrorCode::Eof => "unexpected end of input",
            ErrorCode::InvalidChar => "invalid character in JSON text",
            ErrorCode::Infinity => "number overflowed to infinity",
            ErrorCode::UnescapedControl => "unescaped control character in string",
            ErrorCode::EscapedFormat => "invalid escape character",
            ErrorCode::EscapedUnicode => "invalid \\u escape or surrogate pair",
            ErrorCode::InvalidUtf8 => "invalid UTF-8 in string",
            ErrorCode::UnknownObjKey => "object key not found",
            ErrorCode::ArrIndexOutOfRange => "array index out of range",
            ErrorCode::MismatchType => "node type does not match path segment",
            ErrorCode::UnsupportedJsonPath => "unsupported JSONPath construct",
            ErrorCode::SerUnsupportedType => "node type cannot be serialized",
            ErrorCode::SerInfinity => "cannot serialize a non-finite double",
            ErrorCode::SerInvalidObjKey => "object key node is not a string",
            ErrorCode::NoMem => "allocator returned null",
        };
        f.write_str(msg)
    }
}

/// The library's rich error type. Every fallible operation in this crate
/// returns `Result<T, SonicError>` (or reports an [`ErrorCode`] through an
/// out-parameter on the hottest byte-level loops, per §7 of the design
/// rationale, and is wrapped into a `SonicError` by the caller once control
/// leaves the hot loop).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SonicError {
    #[error("unexpected end of input at offset {offset}")]
    Eof { offset: usize },

    #[error("invalid character at offset {offset}")]
    InvalidChar { offset: usize },

    #[error("number overflowed to infinity at offset {offset}")]
    Infinity { offset: usize },

    #[error("unescaped control character in string at offset {offset}")]
    UnescapedControl { offset: usize },

    #[error("invalid escape character at offset {offset}")]
    EscapedFormat { offset: usize },

    #[error("invalid \\u escape or surrogate pair at offset {offset}")]
    EscapedUnicode { offset: usize },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("object key '{key}' not found at offset {offset}")]
    UnknownObjKey { offset: usize, key: String },

    #[error("array index {index} out of range at offset {offset}")]
    ArrIndexOutOfRange { offset: usize, index: usize },

    #[error("node type does not match path segment at offset {offset}")]
    MismatchType { offset: usize },

    #[error("unsupported JSONPath construct: {detail}")]
    UnsupportedJsonPath { detail: String },

    #[error("node type {type_name} cannot be serialized")]
    SerUnsupportedType { type_name: &'static str },

    #[error("cannot serialize a non-finite double")]
    SerInfinity,

    #[error("object key node is not a string")]
    SerInvalidObjKey,

    #[error("allocator returned null while requesting {requested} bytes")]
    NoMem { requested: usize },
}

impl SonicError {
    /// Maps this error onto its stable [`ErrorCode`].
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SonicError::Eof { .. } => ErrorCode::Eof,
            SonicError::InvalidChar { .. } => ErrorCode::InvalidChar,
            SonicError::Infinity { .. } => ErrorCode::Infinity,
            SonicError::UnescapedControl { .. } => ErrorCode::UnescapedControl,
            SonicError::EscapedFormat { .. } => ErrorCode::EscapedFormat,
            SonicError::EscapedUnicode { .. } => ErrorCode::EscapedUnicode,
            SonicError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
            SonicError::UnknownObjKey { .. } => ErrorCode::UnknownObjKey,
            SonicError::ArrIndexOutOfRange { .. } => ErrorCode::ArrIndexOutOfRange,
            SonicError::MismatchType { .. } => ErrorCode::MismatchType,
            SonicError::UnsupportedJsonPath { .. } => ErrorCode::UnsupportedJsonPath,
            SonicError::SerUnsupportedType { .. } => ErrorCode::SerUnsupportedType,
            SonicError::SerInfinity => ErrorCode::SerInfinity,
            SonicError::SerInvalidObjKey => ErrorCode::SerInvalidObjKey,
            SonicError::NoMem { .. } => ErrorCode::NoMem,
        }
    }

    /// Byte offset at which the error was detected, if this variant carries one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SonicError::Eof { offset }
            | SonicError::InvalidChar { offset }
            | SonicError::Infinity { offset }
            | SonicError::UnescapedControl { offset }
            | SonicError::EscapedFormat { offset }
            | SonicError::EscapedUnicode { offset }
            | SonicError::InvalidUtf8 { offset }
            | SonicError::UnknownObjKey { offset, .. }
            | SonicError::ArrIndexOutOfRange { offset, .. }
            | SonicError::MismatchType { offset } => Some(*offset),
            _ => None,
        }
    }
}

/// Result of a full-document parse (§6.1). `offset` is byte-granular; on a
/// successful parse `offset == input.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub error: Option<SonicError>,
    pub offset: usize,
}

impl ParseResult {
    pub fn ok(offset: usize) -> Self {
        ParseResult { error: None, offset }
    }

    pub fn err(error: SonicError) -> Self {
        let offset = error.offset().unwrap_or(0);
        ParseResult { error: Some(error), offset }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error.as_ref().map(|e| e.error_code()).unwrap_or(ErrorCode::None)
    }
}

/// Shorthand used throughout the crate.
pub type SonicResult<T> = Result<T, SonicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_round_trips_through_serde() {
        let code = ErrorCode::EscapedUnicode;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"escaped_unicode\"");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn parse_result_ok_has_no_error() {
        let r = ParseResult::ok(10);
        assert!(!r.has_error());
        assert_eq!(r.error_code(), ErrorCode::None);
    }

    #[test]
    fn parse_result_err_carries_offset() {
        let r = ParseResult::err(SonicError::InvalidChar { offset: 7 });
        assert!(r.has_error());
        assert_eq!(r.offset, 7);
        assert_eq!(r.error_code(), ErrorCode::InvalidChar);
    }
}
