//! Single-word primitives.
//!
//! Every function here is branch-free and is the building block for the
//! multi-limb arithmetic in [`Uint`](crate::Uint).

/// Machine word used as a limb.
pub type Word = u64;

/// Double-width word holding the full product of two limbs.
pub type WideWord = u128;

/// Size of a [`Word`] in bits.
pub const WORD_BITS: u32 = Word::BITS;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn adc(a: Word, b: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + (b as WideWord) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// `borrow` must be `0` or `1`, and the returned borrow is again `0` or `1`.
#[inline(always)]
pub const fn sbb(a: Word, b: Word, borrow: Word) -> (Word, Word) {
    let ret = (a as WideWord).wrapping_sub((b as WideWord) + (borrow as WideWord));
    (ret as Word, (ret >> (2 * WORD_BITS - 1)) as Word)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub const fn mac(a: Word, b: Word, c: Word, carry: Word) -> (Word, Word) {
    let ret = (a as WideWord) + ((b as WideWord) * (c as WideWord)) + (carry as WideWord);
    (ret as Word, (ret >> WORD_BITS) as Word)
}

/// Returns `1` if `w != 0`, otherwise `0`.
#[inline(always)]
pub const fn is_nonzero(w: Word) -> Word {
    (w | w.wrapping_neg()) >> (WORD_BITS - 1)
}

/// Returns `1` if `a == b`, otherwise `0`.
#[inline(always)]
pub const fn eq(a: Word, b: Word) -> Word {
    is_nonzero(a ^ b) ^ 1
}

/// Returns `1` if `a < b`, otherwise `0`.
#[inline(always)]
pub const fn lt(a: Word, b: Word) -> Word {
    sbb(a, b, 0).1
}

/// Expand a bit (`0` or `1`) into an all-zeros or all-ones mask.
#[inline(always)]
pub const fn mask(bit: Word) -> Word {
    bit.wrapping_neg()
}

/// Returns `b` if `mask` is all ones and `a` if it is all zeros.
#[inline(always)]
pub const fn select(a: Word, b: Word, mask: Word) -> Word {
    a ^ (mask & (a ^ b))
}

/// Number of significant bits in `w`, computed without branching.
pub const fn bits(w: Word) -> u32 {
    let mut x = w;
    let mut n: Word = 0;
    let mut shift = WORD_BITS / 2;

    while shift > 0 {
        let hi = x >> shift;
        let nz = is_nonzero(hi);
        n += nz * (shift as Word);
        x = select(x, hi, mask(nz));
        shift /= 2;
    }

    (n + x) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_carries() {
        assert_eq!(adc(Word::MAX, 1, 0), (0, 1));
        assert_eq!(adc(Word::MAX, Word::MAX, 1), (Word::MAX, 1));
        assert_eq!(adc(1, 2, 0), (3, 0));
    }

    #[test]
    fn sbb_borrows() {
        assert_eq!(sbb(0, 1, 0), (Word::MAX, 1));
        assert_eq!(sbb(0, 0, 1), (Word::MAX, 1));
        assert_eq!(sbb(5, 3, 1), (1, 0));
        assert_eq!(sbb(0, Word::MAX, 1), (0, 1));
    }

    #[test]
    fn mac_full_width() {
        assert_eq!(mac(Word::MAX, Word::MAX, Word::MAX, Word::MAX), (Word::MAX, Word::MAX));
    }

    #[test]
    fn comparisons() {
        assert_eq!(lt(1, 2), 1);
        assert_eq!(lt(2, 2), 0);
        assert_eq!(lt(Word::MAX, 0), 0);
        assert_eq!(eq(7, 7), 1);
        assert_eq!(eq(7, 8), 0);
        assert_eq!(is_nonzero(0), 0);
        assert_eq!(is_nonzero(1 << 63), 1);
    }

    #[test]
    fn bit_length() {
        assert_eq!(bits(0), 0);
        assert_eq!(bits(1), 1);
        assert_eq!(bits(2), 2);
        assert_eq!(bits(0xff), 8);
        assert_eq!(bits(Word::MAX), 64);
        assert_eq!(bits(1 << 40), 41);
    }
}
