//! Parse and serialize configuration (§6.3).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Serialization flags. Combine with `|`; `Default` (empty) reproduces
    /// the library's default minified output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SerializeFlags: u32 {
        /// Do not clear the write buffer before emission; append instead.
        const APPEND_BUFFER = 1 << 0;
        /// Encode 4-byte UTF-8 code points in the emoji range as
        /// `\uXXXX\uXXXX` surrogate pairs (Spark compatibility).
        const ESCAPE_EMOJI = 1 << 1;
        /// Emit uppercase hex digits in `\uXXXX` escapes.
        const UNICODE_ESCAPE_UPPERCASE = 1 << 2;
    }
}

impl Default for SerializeFlags {
    fn default() -> Self {
        SerializeFlags::empty()
    }
}

/// Magnitude cutoffs for fixed-vs-exponential double formatting (§4.3).
/// The default matches sonic's `[1e-6, 1e21)` fixed-form window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatFormatCutoffs {
    pub fixed_lower: f64,
    pub fixed_upper: f64,
}

impl Default for FloatFormatCutoffs {
    fn default() -> Self {
        FloatFormatCutoffs {
            fixed_lower: 1e-6,
            fixed_upper: 1e21,
        }
    }
}

/// Parse-time options. Distinct from `SerializeFlags` because the parser and
/// serializer are independently configurable entry points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParseOptions {
    /// Validate that string contents are well-formed UTF-8 as a separate
    /// pass (§4.2). When `false`, any byte sequence that isn't a raw control
    /// byte or stray escape is accepted inside string literals.
    pub validate_utf8: bool,
    /// Maximum container nesting depth, guarding the recursive-descent
    /// on-demand walker and schema-guided parser against stack overflow on
    /// adversarial input. The SAX driver itself uses an explicit depth
    /// stack and is not bounded by this (see §4.5).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            validate_utf8: true,
            max_depth: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_flags_combine() {
        let f = SerializeFlags::ESCAPE_EMOJI | SerializeFlags::UNICODE_ESCAPE_UPPERCASE;
        assert!(f.contains(SerializeFlags::ESCAPE_EMOJI));
        assert!(f.contains(SerializeFlags::UNICODE_ESCAPE_UPPERCASE));
        assert!(!f.contains(SerializeFlags::APPEND_BUFFER));
    }

    #[test]
    fn default_cutoffs_match_spec() {
        let c = FloatFormatCutoffs::default();
        assert_eq!(c.fixed_lower, 1e-6);
        assert_eq!(c.fixed_upper, 1e21);
    }
}
