//! Power-of-ten and digit-pair tables for the number engine (§4.3).
//!
//! Both tables are computed once, lazily, rather than hand-transcribed:
//! every integer power of ten through `10^22` is exactly representable as
//! an `f64`, and every two-digit ASCII pair follows mechanically from its
//! numeric value, so a runtime loop is exact by construction and carries
//! no risk of a transcription error in a 700-entry magic-constant table.

use std::sync::OnceLock;

const MAX_EXACT_POW10: usize = 22;

static POW10: OnceLock<[f64; MAX_EXACT_POW10 + 1]> = OnceLock::new();

fn pow10_table() -> &'static [f64; MAX_EXACT_POW10 + 1] {
    POW10.get_or_init(|| {
        let mut t = [0f64; MAX_EXACT_POW10 + 1];
        let mut value = 1.0f64;
        for slot in t.iter_mut() {
            *slot = value;
            value *= 10.0;
        }
        t
    })
}

/// Returns `10^exp` for `0 <= exp <= 22`, exact in `f64`.
#[inline]
pub fn pow10_exact(exp: i32) -> f64 {
    debug_assert!((0..=MAX_EXACT_POW10 as i32).contains(&exp));
    pow10_table()[exp as usize]
}

static DIGIT_PAIRS: OnceLock<[u8; 200]> = OnceLock::new();

fn digit_pairs() -> &'static [u8; 200] {
    DIGIT_PAIRS.get_or_init(|| {
        let mut t = [0u8; 200];
        for i in 0..100u32 {
            t[(i * 2) as usize] = b'0' + (i / 10) as u8;
            t[(i * 2 + 1) as usize] = b'0' + (i % 10) as u8;
        }
        t
    })
}

/// The two ASCII digits of `00..=99`, as `(tens, ones)`.
#[inline]
pub fn digit_pair(n: u32) -> (u8, u8) {
    debug_assert!(n < 100);
    let pairs = digit_pairs();
    (pairs[(n * 2) as usize], pairs[(n * 2 + 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_matches_expected_values() {
        assert_eq!(pow10_exact(0), 1.0);
        assert_eq!(pow10_exact(1), 10.0);
        assert_eq!(pow10_exact(22), 1e22);
    }

    #[test]
    fn digit_pair_matches_value() {
        assert_eq!(digit_pair(0), (b'0', b'0'));
        assert_eq!(digit_pair(7), (b'0', b'7'));
        assert_eq!(digit_pair(42), (b'4', b'2'));
        assert_eq!(digit_pair(99), (b'9', b'9'));
    }
}
