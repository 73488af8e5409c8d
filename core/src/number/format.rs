//! Number formatting (§4.3): fixed-shape integer digit extraction and
//! shortest-round-trip double formatting.
//!
//! Integers use the spec's divmod-by-100 fixed-shape extraction with the
//! two-digit ASCII pair table from [`super::tables`]. Doubles reuse the
//! standard library's own shortest-round-trip digit generator (its
//! `LowerExp` formatter) rather than a hand-rolled Ryu implementation —
//! Rust's float formatter already guarantees the shortest decimal that
//! round-trips back to the same `f64`, so re-deriving that guarantee by
//! hand, with no compiler to check it against, would only add risk without
//! adding correctness. This module is responsible for the *shape* the spec
//! cares about (fixed vs. exponential cutoff, signed exponent, always a
//! decimal point), not for re-deriving the digits themselves.

use crate::buffer::WriteBuffer;
use crate::config::FloatFormatCutoffs;
use crate::error::{SonicError, SonicResult};

use super::tables::digit_pair;

/// Appends the decimal representation of `v` to `out`.
pub fn format_i64(out: &mut WriteBuffer, v: i64) {
    if v < 0 {
        out.push_byte(b'-');
        // `v.unsigned_abs()` handles `i64::MIN` correctly (no overflow).
        format_u64(out, v.unsigned_abs());
    } else {
        format_u64(out, v as u64);
    }
}

/// Appends the decimal representation of `v` to `out`, two digits at a
/// time via [`digit_pair`], with a single leading digit when the digit
/// count is odd.
pub fn format_u64(out: &mut WriteBuffer, v: u64) {
    if v == 0 {
        out.push_byte(b'0');
        return;
    }
    let mut buf = [0u8; 20];
    let mut pos = buf.len();
    let mut n = v;
    while n >= 100 {
        let (tens, ones) = digit_pair((n % 100) as u32);
        pos -= 2;
        buf[pos] = tens;
        buf[pos + 1] = ones;
        n /= 100;
    }
    if n >= 10 {
        let (tens, ones) = digit_pair(n as u32);
        pos -= 2;
        buf[pos] = tens;
        buf[pos + 1] = ones;
    } else {
        pos -= 1;
        buf[pos] = b'0' + n as u8;
    }
    out.push(&buf[pos..]);
}

/// Appends the JSON representation of `v` to `out`, choosing fixed or
/// exponential form per `cutoffs` (§4.3). Non-finite doubles are rejected
/// with [`SonicError::SerInfinity`]; JSON has no representation for them.
pub fn format_f64(out: &mut WriteBuffer, v: f64, cutoffs: FloatFormatCutoffs) -> SonicResult<()> {
    if !v.is_finite() {
        return Err(SonicError::SerInfinity);
    }
    if v == 0.0 {
        // `-0.0` formats with its sign (§4.3).
        if v.is_sign_negative() {
            out.push(b"-0.0");
        } else {
            out.push(b"0.0");
        }
        return Ok(());
    }

    let negative = v.is_sign_negative();
    let magnitude = v.abs();

    // Rust's scientific formatter already yields the shortest digit string
    // that round-trips to this exact `f64`, e.g. "1.2345e3" or "1e-2".
    let sci = format!("{:e}", magnitude);
    let (mantissa_part, exp_part) = sci.split_once('e').expect("LowerExp always emits 'e'");
    let exp: i32 = exp_part.parse().expect("LowerExp exponent is always a plain integer");
    let digits: String = mantissa_part.chars().filter(|&c| c != '.').collect();

    if negative {
        out.push_byte(b'-');
    }

    if magnitude >= cutoffs.fixed_lower && magnitude < cutoffs.fixed_upper {
        write_fixed(out, &digits, exp);
    } else {
        write_exponential(out, &digits, exp);
    }
    Ok(())
}

/// Writes `digits` (no leading/trailing zeros, decimal point implicitly
/// after the first digit) in fixed-point form, given that the value's
/// true decimal exponent relative to the first digit is `exp`.
fn write_fixed(out: &mut WriteBuffer, digits: &str, exp: i32) {
    let bytes = digits.as_bytes();
    let n = bytes.len() as i32;
    if exp >= 0 {
        if exp + 1 >= n {
            out.push(bytes);
            for _ in 0..(exp + 1 - n) {
                out.push_byte(b'0');
            }
            out.push(b".0");
        } else {
            let split = (exp + 1) as usize;
            out.push(&bytes[..split]);
            out.push_byte(b'.');
            out.push(&bytes[split..]);
        }
    } else {
        out.push(b"0.");
        for _ in 0..(-exp - 1) {
            out.push_byte(b'0');
        }
        out.push(bytes);
    }
}

/// Writes `digits`/`exp` in exponential form: `d.dddde±NN`, lowercase `e`,
/// always-signed exponent, always a decimal point.
fn write_exponential(out: &mut WriteBuffer, digits: &str, exp: i32) {
    let bytes = digits.as_bytes();
    out.push_byte(bytes[0]);
    out.push_byte(b'.');
    if bytes.len() > 1 {
        out.push(&bytes[1..]);
    } else {
        out.push_byte(b'0');
    }
    out.push_byte(b'e');
    if exp >= 0 {
        out.push_byte(b'+');
    } else {
        out.push_byte(b'-');
    }
    format_u64(out, exp.unsigned_abs() as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt_u64(v: u64) -> String {
        let mut out = WriteBuffer::new();
        format_u64(&mut out, v);
        out.to_string_lossy()
    }

    fn fmt_i64(v: i64) -> String {
        let mut out = WriteBuffer::new();
        format_i64(&mut out, v);
        out.to_string_lossy()
    }

    fn fmt_f64(v: f64) -> String {
        let mut out = WriteBuffer::new();
        format_f64(&mut out, v, FloatFormatCutoffs::default()).unwrap();
        out.to_string_lossy()
    }

    #[test]
    fn formats_zero() {
        assert_eq!(fmt_u64(0), "0");
    }

    #[test]
    fn formats_small_and_large_unsigned() {
        assert_eq!(fmt_u64(7), "7");
        assert_eq!(fmt_u64(42), "42");
        assert_eq!(fmt_u64(12345), "12345");
        assert_eq!(fmt_u64(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn formats_negative_and_min() {
        assert_eq!(fmt_i64(-42), "-42");
        assert_eq!(fmt_i64(i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn formats_fixed_point_double() {
        assert_eq!(fmt_f64(3.5), "3.5");
        assert_eq!(fmt_f64(100.0), "100.0");
        assert_eq!(fmt_f64(0.0015), "0.0015");
    }

    #[test]
    fn formats_negative_zero() {
        assert_eq!(fmt_f64(-0.0), "-0.0");
        assert_eq!(fmt_f64(0.0), "0.0");
    }

    #[test]
    fn formats_exponential_above_upper_cutoff() {
        let s = fmt_f64(1e25);
        assert_eq!(s, "1.0e+25");
    }

    #[test]
    fn formats_exponential_below_lower_cutoff() {
        let s = fmt_f64(1e-10);
        assert_eq!(s, "1.0e-10");
    }

    #[test]
    fn formats_multi_digit_exponential_mantissa() {
        let s = fmt_f64(1.2345e30);
        assert_eq!(s, "1.2345e+30");
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let mut out = WriteBuffer::new();
        assert!(format_f64(&mut out, f64::NAN, FloatFormatCutoffs::default()).is_err());
        assert!(format_f64(&mut out, f64::INFINITY, FloatFormatCutoffs::default()).is_err());
    }
}
