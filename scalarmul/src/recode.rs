//! Scalar recodings for the variable-time algorithms.
//!
//! All functions here take public little-endian limbs and may branch on them.

use alloc::vec::Vec;
use bigint::{Vartime, Word};

const WORD_BITS: usize = Word::BITS as usize;

/// Number of significant bits in little-endian `limbs`.
pub fn bits_vartime(limbs: Vartime<&[Word]>) -> usize {
    let limbs = limbs.into_inner();
    limbs
        .iter()
        .rposition(|&w| w != 0)
        .map_or(0, |i| i * WORD_BITS + (WORD_BITS - limbs[i].leading_zeros() as usize))
}

/// Read `width` bits starting at bit `pos`; bits past the end read as zero.
fn window_at(limbs: &[Word], pos: usize, width: usize) -> u64 {
    debug_assert!(width > 0 && width < WORD_BITS);
    let (index, shift) = (pos / WORD_BITS, pos % WORD_BITS);

    let lo = limbs.get(index).copied().unwrap_or(0) >> shift;
    let hi = match shift {
        0 => 0,
        _ => limbs.get(index + 1).copied().unwrap_or(0) << (WORD_BITS - shift),
    };

    (lo | hi) & ((1 << width) - 1)
}

/// Width-`window` non-adjacent form, least significant digit first.
///
/// Every non-zero digit is odd with absolute value below `2^(window - 1)`, and any `window`
/// consecutive digits contain at most one non-zero digit. Trailing zero digits are trimmed, so
/// the empty vector encodes zero.
///
/// # Panics
///
/// If `window` is outside `2..=16`.
pub fn wnaf(scalar: Vartime<&[Word]>, window: usize) -> Vec<i32> {
    assert!((2..=16).contains(&window), "window must be in 2..=16");

    let limbs = scalar.into_inner();
    let bits = bits_vartime(scalar);
    let width = 1u64 << window;

    let mut digits = Vec::with_capacity(bits + window);
    let mut carry = 0;
    let mut pos = 0;

    while pos < bits || carry != 0 {
        let value = carry + window_at(limbs, pos, window);

        if value & 1 == 0 {
            digits.push(0);
            pos += 1;
            continue;
        }

        if value < width / 2 {
            carry = 0;
            digits.push(value as i32);
        } else {
            carry = 1;
            digits.push(value as i32 - width as i32);
        }

        digits.extend(core::iter::repeat_n(0, window - 1));
        pos += window;
    }

    while digits.last() == Some(&0) {
        digits.pop();
    }

    digits
}

/// Signed binary non-adjacent form: digits in `{-1, 0, 1}` with no two adjacent non-zero
/// digits. This is the minimum Hamming weight signed binary representation.
pub fn naf(scalar: Vartime<&[Word]>) -> Vec<i32> {
    wnaf(scalar, 2)
}

/// Split a scalar into `window`-bit digits in `[-2^(window - 1), 2^(window - 1))`, least
/// significant first, such that `sum(d_i * 2^(window * i))` equals the scalar.
///
/// `num_digits` must be at least `(bits + 1) / window + 1` to absorb the final carry.
///
/// # Panics
///
/// If `window` is outside `2..=31`, or `num_digits` is too small for the scalar.
pub fn signed_window_digits(scalar: Vartime<&[Word]>, window: usize, num_digits: usize) -> Vec<i32> {
    assert!((2..32).contains(&window), "window must be in 2..32");
    let limbs = scalar.into_inner();
    let half = 1i64 << (window - 1);

    let mut digits = Vec::with_capacity(num_digits);
    let mut carry = 0;

    for i in 0..num_digits {
        let value = window_at(limbs, i * window, window) as i64 + carry;
        if value >= half {
            digits.push((value - (half << 1)) as i32);
            carry = 1;
        } else {
            digits.push(value as i32);
            carry = 0;
        }
    }

    assert!(
        carry == 0 && num_digits * window >= bits_vartime(scalar),
        "too few digits for scalar"
    );
    digits
}

/// Unsigned `window`-bit digit number `index` of a scalar.
pub(crate) fn unsigned_window_digit(scalar: Vartime<&[Word]>, window: usize, index: usize) -> usize {
    window_at(scalar.into_inner(), index * window, window) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Evaluate little-endian digits in base `2^shift` (as `i128`).
    fn eval(digits: &[i32], shift: usize) -> i128 {
        digits
            .iter()
            .rev()
            .fold(0i128, |acc, &d| (acc << shift) + d as i128)
    }

    #[test]
    fn bits() {
        assert_eq!(bits_vartime(Vartime::new(&[])), 0);
        assert_eq!(bits_vartime(Vartime::new(&[0, 0])), 0);
        assert_eq!(bits_vartime(Vartime::new(&[1])), 1);
        assert_eq!(bits_vartime(Vartime::new(&[0, 1])), 65);
        assert_eq!(bits_vartime(Vartime::new(&[u64::MAX, 0])), 64);
    }

    #[test]
    fn window_straddles_limbs() {
        let limbs = [0xf000_0000_0000_0000, 0x5];
        assert_eq!(window_at(&limbs, 60, 8), 0x5f);
        assert_eq!(window_at(&limbs, 64, 8), 0x05);
        assert_eq!(window_at(&limbs, 128, 8), 0);
    }

    #[test]
    fn naf_of_seven() {
        // 7 = 8 - 1
        assert_eq!(naf(Vartime::new(&[7])), vec![-1, 0, 0, 1]);
    }

    #[test]
    fn wnaf_zero_is_empty() {
        assert!(wnaf(Vartime::new(&[0, 0]), 5).is_empty());
    }

    #[test]
    fn wnaf_properties() {
        let scalars: [u64; 6] = [1, 2, 0xff, 0xdead_beef, u64::MAX, 0x8000_0000_0000_0001];
        for window in [2, 3, 5, 8, 13] {
            for &k in &scalars {
                let digits = wnaf(Vartime::new(&[k]), window);
                assert_eq!(eval(&digits, 1), k as i128, "k = {k:#x}, w = {window}");

                for (i, &d) in digits.iter().enumerate() {
                    if d != 0 {
                        assert_eq!(d & 1, 1, "even digit");
                        assert!(d.unsigned_abs() < 1 << (window - 1));
                        let end = (i + window).min(digits.len());
                        assert!(digits[i + 1..end].iter().all(|&x| x == 0));
                    }
                }
            }
        }
    }

    #[test]
    fn wnaf_multi_limb() {
        let limbs = [u64::MAX, 0xffff];
        let digits = wnaf(Vartime::new(&limbs), 5);
        assert_eq!(eval(&digits, 1), (1i128 << 80) - 1);
    }

    #[test]
    fn signed_windows() {
        let k = 0xfedc_ba98_7654_3210u64;
        for window in [2, 3, 4, 7, 16] {
            let n = 65 / window + 1;
            let digits = signed_window_digits(Vartime::new(&[k]), window, n);
            assert_eq!(eval(&digits, window), k as i128);
            let half = 1 << (window - 1);
            assert!(digits.iter().all(|&d| (-half..half).contains(&d)));
        }
    }
}
