//! Fixed-width unsigned integer.

use crate::limb::{self, WORD_BITS, Word};
use core::{cmp::Ordering, fmt};
use subtle::{
    Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess,
};
use zeroize::DefaultIsZeroes;

/// Fixed-width unsigned integer made of `LIMBS` little-endian 64-bit words.
///
/// All methods without a `_vartime` suffix run in time which depends only on
/// `LIMBS` (and, for shifts, on nothing else), never on the value.
#[derive(Clone, Copy, Hash)]
pub struct Uint<const LIMBS: usize> {
    limbs: [Word; LIMBS],
}

impl<const LIMBS: usize> Uint<LIMBS> {
    /// The value `0`.
    pub const ZERO: Self = Self::from_u64(0);

    /// The value `1`.
    pub const ONE: Self = Self::from_u64(1);

    /// Largest representable value.
    pub const MAX: Self = Self {
        limbs: [Word::MAX; LIMBS],
    };

    /// Number of limbs.
    pub const LIMBS: usize = LIMBS;

    /// Width in bits.
    pub const BITS: u32 = LIMBS as u32 * WORD_BITS;

    /// Width in bytes.
    pub const BYTES: usize = LIMBS * 8;

    /// Create a [`Uint`] from little-endian words.
    #[inline]
    pub const fn from_words(limbs: [Word; LIMBS]) -> Self {
        Self { limbs }
    }

    /// Borrow the little-endian words.
    #[inline]
    pub const fn as_words(&self) -> &[Word; LIMBS] {
        &self.limbs
    }

    /// Copy out the little-endian words.
    #[inline]
    pub const fn to_words(self) -> [Word; LIMBS] {
        self.limbs
    }

    /// Create a [`Uint`] from a `u64`.
    pub const fn from_u64(n: u64) -> Self {
        let mut limbs = [0; LIMBS];
        limbs[0] = n;
        Self { limbs }
    }

    /// Create a [`Uint`] from a `u128`.
    ///
    /// # Panics
    ///
    /// If `LIMBS == 1` and `n` does not fit in 64 bits.
    pub const fn from_u128(n: u128) -> Self {
        let mut limbs = [0; LIMBS];
        limbs[0] = n as Word;
        if LIMBS > 1 {
            limbs[1] = (n >> WORD_BITS) as Word;
        } else {
            assert!(n >> WORD_BITS == 0, "u128 does not fit");
        }
        Self { limbs }
    }

    /// Parse a big-endian hexadecimal string.
    ///
    /// Intended for constants: the string may be shorter than the full width
    /// but must not contain anything other than hex digits.
    ///
    /// # Panics
    ///
    /// - When hex is malformed
    /// - When the input has more digits than fit in `LIMBS` words
    pub const fn from_be_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(bytes.len() <= LIMBS * 16, "hex string is too long");

        let mut limbs = [0; LIMBS];
        let mut i = 0;

        while i < bytes.len() {
            let nibble = decode_hex_nibble(bytes[bytes.len() - 1 - i]) as Word;
            limbs[i / 16] |= nibble << ((i % 16) * 4);
            i += 1;
        }

        Self { limbs }
    }

    /// Decode from big-endian bytes, zero-extending on the left.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than [`Uint::BYTES`].
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= Self::BYTES, "input is too long");
        let mut limbs = [0; LIMBS];

        for (i, &b) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (b as Word) << ((i % 8) * 8);
        }

        Self { limbs }
    }

    /// Decode from little-endian bytes, zero-extending on the right.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than [`Uint::BYTES`].
    pub fn from_le_slice(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= Self::BYTES, "input is too long");
        let mut limbs = [0; LIMBS];

        for (i, &b) in bytes.iter().enumerate() {
            limbs[i / 8] |= (b as Word) << ((i % 8) * 8);
        }

        Self { limbs }
    }

    /// Write the `out.len()` least significant bytes in big-endian order.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        debug_assert!(out.len() <= Self::BYTES);
        let len = out.len();

        for (i, byte) in out.iter_mut().enumerate() {
            let pos = len - 1 - i;
            *byte = (self.limbs[pos / 8] >> ((pos % 8) * 8)) as u8;
        }
    }

    /// Write the `out.len()` least significant bytes in little-endian order.
    pub fn write_le_bytes(&self, out: &mut [u8]) {
        debug_assert!(out.len() <= Self::BYTES);

        for (i, byte) in out.iter_mut().enumerate() {
            *byte = (self.limbs[i / 8] >> ((i % 8) * 8)) as u8;
        }
    }

    /// Computes `self + rhs + carry`, returning the result along with the new carry.
    #[inline]
    pub const fn adc(&self, rhs: &Self, mut carry: Word) -> (Self, Word) {
        let mut limbs = [0; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, c) = limb::adc(self.limbs[i], rhs.limbs[i], carry);
            limbs[i] = w;
            carry = c;
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Computes `self - (rhs + borrow)`, returning the result along with the new borrow.
    #[inline]
    pub const fn sbb(&self, rhs: &Self, mut borrow: Word) -> (Self, Word) {
        let mut limbs = [0; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, b) = limb::sbb(self.limbs[i], rhs.limbs[i], borrow);
            limbs[i] = w;
            borrow = b;
            i += 1;
        }

        (Self { limbs }, borrow)
    }

    /// Addition modulo `2^BITS`.
    #[inline]
    pub const fn wrapping_add(&self, rhs: &Self) -> Self {
        self.adc(rhs, 0).0
    }

    /// Subtraction modulo `2^BITS`.
    #[inline]
    pub const fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.sbb(rhs, 0).0
    }

    /// Full schoolbook product, returned as `(lo, hi)`.
    pub const fn mul_wide(&self, rhs: &Self) -> (Self, Self) {
        let mut lo = [0; LIMBS];
        let mut hi = [0; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let mut carry = 0;
            let mut j = 0;

            while j < LIMBS {
                let k = i + j;
                if k < LIMBS {
                    let (w, c) = limb::mac(lo[k], self.limbs[i], rhs.limbs[j], carry);
                    lo[k] = w;
                    carry = c;
                } else {
                    let (w, c) = limb::mac(hi[k - LIMBS], self.limbs[i], rhs.limbs[j], carry);
                    hi[k - LIMBS] = w;
                    carry = c;
                }
                j += 1;
            }

            hi[i] = carry;
            i += 1;
        }

        (Self { limbs: lo }, Self { limbs: hi })
    }

    /// Full square, returned as `(lo, hi)`.
    #[inline]
    pub const fn square_wide(&self) -> (Self, Self) {
        self.mul_wide(self)
    }

    /// Multiplication modulo `2^BITS`.
    #[inline]
    pub const fn wrapping_mul(&self, rhs: &Self) -> Self {
        self.mul_wide(rhs).0
    }

    /// Shift left by one bit, returning the result and the bit shifted out.
    #[inline]
    pub const fn shl1(&self) -> (Self, Word) {
        let mut limbs = [0; LIMBS];
        let mut carry = 0;
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = (self.limbs[i] << 1) | carry;
            carry = self.limbs[i] >> (WORD_BITS - 1);
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Shift right by one bit, returning the result and the bit shifted out.
    #[inline]
    pub const fn shr1(&self) -> (Self, Word) {
        let mut limbs = [0; LIMBS];
        let mut carry = 0;
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            limbs[i] = (self.limbs[i] >> 1) | (carry << (WORD_BITS - 1));
            carry = self.limbs[i] & 1;
        }

        (Self { limbs }, carry)
    }

    /// Shift left by a public amount. Shifts of `BITS` or more produce zero.
    pub const fn shl_vartime(&self, shift: u32) -> Self {
        if shift >= Self::BITS {
            return Self::ZERO;
        }

        let words = (shift / WORD_BITS) as usize;
        let bits = shift % WORD_BITS;
        let mut limbs = [0; LIMBS];
        let mut i = LIMBS;

        while i > words {
            i -= 1;
            let src = i - words;
            let mut w = self.limbs[src] << bits;
            if bits > 0 && src > 0 {
                w |= self.limbs[src - 1] >> (WORD_BITS - bits);
            }
            limbs[i] = w;
        }

        Self { limbs }
    }

    /// Shift right by a public amount. Shifts of `BITS` or more produce zero.
    pub const fn shr_vartime(&self, shift: u32) -> Self {
        if shift >= Self::BITS {
            return Self::ZERO;
        }

        let words = (shift / WORD_BITS) as usize;
        let bits = shift % WORD_BITS;
        let mut limbs = [0; LIMBS];
        let mut i = 0;

        while i + words < LIMBS {
            let src = i + words;
            let mut w = self.limbs[src] >> bits;
            if bits > 0 && src + 1 < LIMBS {
                w |= self.limbs[src + 1] << (WORD_BITS - bits);
            }
            limbs[i] = w;
            i += 1;
        }

        Self { limbs }
    }

    /// Shift left in constant time with respect to `shift`.
    pub const fn shl(&self, shift: u32) -> Self {
        let mut result = *self;
        let mut stage = 0;

        while (1u32 << stage) < Self::BITS {
            let bit = ((shift >> stage) & 1) as Word;
            let shifted = result.shl_vartime(1 << stage);
            result = Self::select(&result, &shifted, limb::mask(bit));
            stage += 1;
        }

        Self::select(&result, &Self::ZERO, limb::mask(Self::overflowing_shift(shift)))
    }

    /// Shift right in constant time with respect to `shift`.
    pub const fn shr(&self, shift: u32) -> Self {
        let mut result = *self;
        let mut stage = 0;

        while (1u32 << stage) < Self::BITS {
            let bit = ((shift >> stage) & 1) as Word;
            let shifted = result.shr_vartime(1 << stage);
            result = Self::select(&result, &shifted, limb::mask(bit));
            stage += 1;
        }

        Self::select(&result, &Self::ZERO, limb::mask(Self::overflowing_shift(shift)))
    }

    /// `1` if `shift >= BITS`.
    #[inline(always)]
    const fn overflowing_shift(shift: u32) -> Word {
        ((Self::BITS as Word).wrapping_sub(shift as Word + 1)) >> (WORD_BITS - 1)
    }

    /// Constant-time select: returns `b` when `mask` is all ones, `a` when all zeros.
    #[inline]
    pub const fn select(a: &Self, b: &Self, mask: Word) -> Self {
        let mut limbs = [0; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = limb::select(a.limbs[i], b.limbs[i], mask);
            i += 1;
        }

        Self { limbs }
    }

    /// Number of significant bits.
    pub const fn bits(&self) -> u32 {
        let mut bits: Word = 0;
        let mut i = 0;

        while i < LIMBS {
            let nz = limb::is_nonzero(self.limbs[i]);
            let limb_bits = (i as Word) * (WORD_BITS as Word) + limb::bits(self.limbs[i]) as Word;
            bits = limb::select(bits, limb_bits, limb::mask(nz));
            i += 1;
        }

        bits as u32
    }

    /// Number of significant bits, for public values.
    pub const fn bits_vartime(&self) -> u32 {
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            if self.limbs[i] != 0 {
                return (i as u32) * WORD_BITS + (WORD_BITS - self.limbs[i].leading_zeros());
            }
        }

        0
    }

    /// Get bit `index`, without branching on the value or the index.
    pub const fn bit(&self, index: u32) -> Word {
        let word_index = (index / WORD_BITS) as Word;
        let bit_index = index % WORD_BITS;
        let mut result = 0;
        let mut i = 0;

        while i < LIMBS {
            let hit = limb::eq(i as Word, word_index);
            result |= hit & (self.limbs[i] >> bit_index);
            i += 1;
        }

        result & 1
    }

    /// Get bit `index` of a public value. Out-of-range indices return `false`.
    #[inline]
    pub const fn bit_vartime(&self, index: u32) -> bool {
        if index >= Self::BITS {
            return false;
        }

        (self.limbs[(index / WORD_BITS) as usize] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Number of trailing zero bits of a public value; `BITS` for zero.
    pub const fn trailing_zeros_vartime(&self) -> u32 {
        let mut i = 0;

        while i < LIMBS {
            if self.limbs[i] != 0 {
                return (i as u32) * WORD_BITS + self.limbs[i].trailing_zeros();
            }
            i += 1;
        }

        Self::BITS
    }

    /// Is this value odd?
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.limbs[0] & 1) as u8)
    }

    /// Is this value zero?
    #[inline]
    pub fn is_zero(&self) -> Choice {
        Choice::from(limb::is_nonzero(self.or_limbs()) as u8 ^ 1)
    }

    /// Is this value zero? For public values.
    #[inline]
    pub const fn is_zero_vartime(&self) -> bool {
        self.or_limbs() == 0
    }

    #[inline(always)]
    const fn or_limbs(&self) -> Word {
        let mut acc = 0;
        let mut i = 0;
        while i < LIMBS {
            acc |= self.limbs[i];
            i += 1;
        }
        acc
    }

    /// `1` if `self < rhs`, otherwise `0`, in constant time.
    #[inline]
    pub const fn lt_word(&self, rhs: &Self) -> Word {
        self.sbb(rhs, 0).1
    }

    /// Three-way comparison in constant time: `-1`, `0` or `1`.
    pub const fn ct_cmp(&self, rhs: &Self) -> i8 {
        let lt = self.lt_word(rhs) as i8;
        let gt = rhs.lt_word(self) as i8;
        gt - lt
    }

    /// Three-way comparison of public values.
    pub const fn cmp_vartime(&self, rhs: &Self) -> Ordering {
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            if self.limbs[i] < rhs.limbs[i] {
                return Ordering::Less;
            }
            if self.limbs[i] > rhs.limbs[i] {
                return Ordering::Greater;
            }
        }

        Ordering::Equal
    }
}

const fn decode_hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

//
// `subtle` trait impls
//

impl<const LIMBS: usize> ConditionallySelectable for Uint<LIMBS> {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::select(a, b, limb::mask(choice.unwrap_u8() as Word))
    }
}

impl<const LIMBS: usize> ConstantTimeEq for Uint<LIMBS> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = 0;
        for i in 0..LIMBS {
            acc |= self.limbs[i] ^ other.limbs[i];
        }
        Choice::from((limb::is_nonzero(acc) ^ 1) as u8)
    }
}

impl<const LIMBS: usize> ConstantTimeGreater for Uint<LIMBS> {
    #[inline]
    fn ct_gt(&self, other: &Self) -> Choice {
        Choice::from(other.lt_word(self) as u8)
    }
}

impl<const LIMBS: usize> ConstantTimeLess for Uint<LIMBS> {
    #[inline]
    fn ct_lt(&self, other: &Self) -> Choice {
        Choice::from(self.lt_word(other) as u8)
    }
}

//
// Miscellaneous trait impls
//

impl<const LIMBS: usize> Default for Uint<LIMBS> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const LIMBS: usize> DefaultIsZeroes for Uint<LIMBS> {}

impl<const LIMBS: usize> Eq for Uint<LIMBS> {}
impl<const LIMBS: usize> PartialEq for Uint<LIMBS> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const LIMBS: usize> Ord for Uint<LIMBS> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ct_cmp(other).cmp(&0)
    }
}

impl<const LIMBS: usize> PartialOrd for Uint<LIMBS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const LIMBS: usize> AsRef<[Word]> for Uint<LIMBS> {
    fn as_ref(&self) -> &[Word] {
        &self.limbs
    }
}

impl<const LIMBS: usize> From<u64> for Uint<LIMBS> {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl<const LIMBS: usize> From<u128> for Uint<LIMBS> {
    fn from(n: u128) -> Self {
        Self::from_u128(n)
    }
}

impl<const LIMBS: usize> From<[Word; LIMBS]> for Uint<LIMBS> {
    fn from(limbs: [Word; LIMBS]) -> Self {
        Self::from_words(limbs)
    }
}

//
// `core::fmt` trait impls
//

impl<const LIMBS: usize> fmt::Debug for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint(0x{self:X})")
    }
}

impl<const LIMBS: usize> fmt::Display for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl<const LIMBS: usize> fmt::LowerHex for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            write!(f, "{limb:016x}")?;
        }
        Ok(())
    }
}

impl<const LIMBS: usize> fmt::UpperHex for Uint<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            write!(f, "{limb:016X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::Uint;
    use crate::{U128, U256};
    use core::cmp::Ordering;
    use std::format;
    use subtle::{ConditionallySelectable, ConstantTimeGreater, ConstantTimeLess};

    #[test]
    fn from_be_hex_short_input() {
        let n = U256::from_be_hex("1234");
        assert_eq!(n, U256::from_u64(0x1234));
    }

    #[test]
    fn from_be_hex_full_width() {
        let n = U128::from_be_hex("0123456789abcdeffedcba9876543210");
        assert_eq!(n.as_words(), &[0xfedcba9876543210, 0x0123456789abcdef]);
    }

    #[test]
    #[should_panic]
    fn from_be_hex_rejects_garbage() {
        let _ = U128::from_be_hex("xyz");
    }

    #[test]
    fn byte_codecs() {
        let n = U128::from_be_hex("0123456789abcdeffedcba9876543210");
        let mut be = [0u8; 16];
        n.write_be_bytes(&mut be);
        assert_eq!(be[0], 0x01);
        assert_eq!(be[15], 0x10);
        assert_eq!(U128::from_be_slice(&be), n);

        let mut le = [0u8; 16];
        n.write_le_bytes(&mut le);
        assert_eq!(le[0], 0x10);
        assert_eq!(U128::from_le_slice(&le), n);
    }

    #[test]
    fn add_with_carry() {
        let (sum, carry) = U128::MAX.adc(&U128::ONE, 0);
        assert_eq!(sum, U128::ZERO);
        assert_eq!(carry, 1);
    }

    #[test]
    fn sub_with_borrow() {
        let (diff, borrow) = U128::ZERO.sbb(&U128::ONE, 0);
        assert_eq!(diff, U128::MAX);
        assert_eq!(borrow, 1);
    }

    #[test]
    fn mul_wide_max() {
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        let (lo, hi) = U128::MAX.mul_wide(&U128::MAX);
        assert_eq!(lo, U128::ONE);
        assert_eq!(hi, U128::MAX.wrapping_sub(&U128::ONE));
    }

    #[test]
    fn shifts() {
        let one = U256::ONE;
        assert_eq!(one.shl(255), U256::from_be_hex("8").shl_vartime(252));
        assert_eq!(one.shl(256), U256::ZERO);
        assert_eq!(one.shl(u32::MAX), U256::ZERO);
        assert_eq!(one.shl(70).shr(70), one);
        assert_eq!(one.shl_vartime(70), one.shl(70));
        assert_eq!(U256::MAX.shr(255), one);
        assert_eq!(U256::MAX.shr_vartime(200), U256::MAX.shr(200));
        assert_eq!(U256::MAX.shr(300), U256::ZERO);
    }

    #[test]
    fn shift_by_one() {
        let (n, carry) = U128::MAX.shl1();
        assert_eq!(carry, 1);
        assert_eq!(n, U128::MAX.wrapping_sub(&U128::ONE));

        let (n, out) = U128::from_u64(3).shr1();
        assert_eq!(out, 1);
        assert_eq!(n, U128::ONE);
    }

    #[test]
    fn bit_queries() {
        let n = U256::ONE.shl_vartime(200);
        assert_eq!(n.bits(), 201);
        assert_eq!(n.bits_vartime(), 201);
        assert_eq!(n.bit(200), 1);
        assert_eq!(n.bit(199), 0);
        assert!(n.bit_vartime(200));
        assert!(!n.bit_vartime(256));
        assert_eq!(n.trailing_zeros_vartime(), 200);
        assert_eq!(U256::ZERO.bits(), 0);
        assert_eq!(U256::ZERO.trailing_zeros_vartime(), 256);
    }

    #[test]
    fn comparisons() {
        let a = U256::from_u64(5);
        let b = U256::ONE.shl_vartime(130);
        assert_eq!(a.ct_cmp(&b), -1);
        assert_eq!(b.ct_cmp(&a), 1);
        assert_eq!(a.ct_cmp(&a), 0);
        assert_eq!(a.cmp_vartime(&b), Ordering::Less);
        assert!(bool::from(a.ct_lt(&b)));
        assert!(bool::from(b.ct_gt(&a)));
        assert!(a < b);
    }

    #[test]
    fn conditional_select() {
        let a = U256::from_u64(1);
        let b = U256::from_u64(2);
        assert_eq!(Uint::conditional_select(&a, &b, 0.into()), a);
        assert_eq!(Uint::conditional_select(&a, &b, 1.into()), b);
    }

    #[test]
    fn display_hex() {
        let n = U128::from_u64(0xab);
        assert_eq!(format!("{n:x}"), "000000000000000000000000000000ab");
    }
}
