//! Field elements which use an internal Montgomery form representation, implemented using
//! the `ct-bigint` modular kernels.

mod sqrt;

use crate::ByteOrder;
use bigint::{
    MontyParams, Uint, Vartime, Word,
    modular::{self, montgomery_mul},
};
use core::{
    cmp::Ordering,
    fmt,
    iter::{Product, Sum},
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use ff::{Field, PrimeField};
use rand_core::RngCore;
use subtle::{
    Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess,
    CtOption,
};
use zeroize::DefaultIsZeroes;

/// Field parameters: the Montgomery constants of the modulus plus the additional constants
/// required by [`PrimeField`].
pub trait MontyFieldParams<const LIMBS: usize>:
    Copy + fmt::Debug + Default + Eq + Send + Sync + 'static
{
    /// Montgomery parameters of the modulus.
    const PARAMS: MontyParams<LIMBS>;

    /// Byte order to use when serializing a field element as bytes.
    const BYTE_ORDER: ByteOrder;

    /// Field modulus as a hexadecimal string.
    const MODULUS_HEX: &'static str;

    /// A fixed multiplicative generator of `modulus - 1` order.
    ///
    /// This element must also be a quadratic nonresidue.
    const MULTIPLICATIVE_GENERATOR: u64;

    /// `T = (modulus - 1) >> S`, where `S = (modulus - 1).trailing_zeros()`
    const T: Uint<LIMBS>;

    /// Optional precomputed `ROOT_OF_UNITY`, otherwise will be computed at compile-time.
    const ROOT_OF_UNITY: Option<Uint<LIMBS>>;
}

/// Serialized representation of a field element: `8 * LIMBS` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldBytes<const LIMBS: usize>([[u8; 8]; LIMBS]);

impl<const LIMBS: usize> FieldBytes<LIMBS> {
    /// Encoded length in bytes.
    pub const LEN: usize = LIMBS * 8;

    /// Copy from a slice of exactly [`FieldBytes::LEN`] bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != Self::LEN {
            return None;
        }

        let mut bytes = Self::default();
        bytes.as_mut().copy_from_slice(slice);
        Some(bytes)
    }
}

impl<const LIMBS: usize> Default for FieldBytes<LIMBS> {
    fn default() -> Self {
        Self([[0; 8]; LIMBS])
    }
}

impl<const LIMBS: usize> AsRef<[u8]> for FieldBytes<LIMBS> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_flattened()
    }
}

impl<const LIMBS: usize> AsMut<[u8]> for FieldBytes<LIMBS> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.0.as_flattened_mut()
    }
}

impl<const LIMBS: usize> fmt::Debug for FieldBytes<LIMBS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldBytes(")?;
        for byte in self.as_ref() {
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}

/// Access to the canonical (non-Montgomery) little-endian limbs of a field element.
///
/// Scalar multiplication routines consume scalars through this trait.
pub trait CanonicalLimbs {
    /// Limb container.
    type Limbs: AsRef<[Word]> + Copy;

    /// Canonical representative as little-endian limbs.
    fn canonical_limbs(&self) -> Self::Limbs;
}

/// Field element type which uses an internal Montgomery form representation.
#[derive(Clone, Copy)]
pub struct MontyFieldElement<MOD, const LIMBS: usize>
where
    MOD: MontyFieldParams<LIMBS>,
{
    montgomery: Uint<LIMBS>,
    params: PhantomData<MOD>,
}

impl<MOD, const LIMBS: usize> MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    /// Zero element (additive identity).
    pub const ZERO: Self = Self::from_montgomery(Uint::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self::from_montgomery(*MOD::PARAMS.one());

    /// Number of limbs used by the internal integer representation.
    pub const LIMBS: usize = LIMBS;

    /// Decode field element from a canonical bytestring representation.
    #[inline]
    pub fn from_bytes(repr: &FieldBytes<LIMBS>) -> CtOption<Self> {
        let uint = match MOD::BYTE_ORDER {
            ByteOrder::BigEndian => Uint::from_be_slice(repr.as_ref()),
            ByteOrder::LittleEndian => Uint::from_le_slice(repr.as_ref()),
        };

        Self::from_uint(&uint)
    }

    /// Decode field element from a canonical byte slice.
    ///
    /// Slice is expected to be zero padded to the expected byte size.
    #[inline]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let repr = FieldBytes::from_slice(slice)?;
        Self::from_bytes(&repr).into()
    }

    /// Reduce a big-endian byte string of up to twice the field width.
    ///
    /// Used to map uniformly random strings to field elements with negligible bias.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than `16 * LIMBS`.
    pub fn from_be_bytes_wide(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= 2 * Uint::<LIMBS>::BYTES, "input is too long");
        let split = bytes.len().saturating_sub(Uint::<LIMBS>::BYTES);
        let (hi, lo) = bytes.split_at(split);

        // hi * 2^BITS + lo, where 2^BITS in Montgomery form is `R^2 mod p`.
        let radix = Self::from_montgomery(*MOD::PARAMS.r2());
        let hi = Self::from_uint_reduced(&Uint::from_be_slice(hi));
        let lo = Self::from_uint_reduced(&Uint::from_be_slice(lo));
        hi.multiply(&radix).add(&lo)
    }

    /// Decode a field element from a big endian hex string.
    ///
    /// This is primarily intended for defining constants using hex literals.
    ///
    /// # Panics
    ///
    /// - When hex is malformed
    /// - When input is too long
    /// - If input overflows the modulus
    pub const fn from_hex_vartime(hex: &str) -> Self {
        let uint = Uint::from_be_hex(hex);

        assert!(
            uint.cmp_vartime(MOD::PARAMS.modulus()).is_lt(),
            "hex encoded field element overflows modulus"
        );

        Self::from_uint_reduced(&uint)
    }

    /// Convert [`Uint`] into [`MontyFieldElement`], first converting it into Montgomery form:
    ///
    /// ```text
    /// w * R^2 * R^-1 mod p = wR mod p
    /// ```
    ///
    /// Reduces the input modulo `p`.
    #[inline]
    pub const fn from_uint_reduced(uint: &Uint<LIMBS>) -> Self {
        Self::from_montgomery(montgomery_mul(uint, MOD::PARAMS.r2(), &MOD::PARAMS))
    }

    /// Convert [`Uint`] into [`MontyFieldElement`], first converting it into Montgomery form:
    ///
    /// ```text
    /// w * R^2 * R^-1 mod p = wR mod p
    /// ```
    ///
    /// # Returns
    ///
    /// The `CtOption` equivalent of `None` if the input overflows the modulus.
    #[inline]
    pub fn from_uint(uint: &Uint<LIMBS>) -> CtOption<Self> {
        let is_some = uint.ct_lt(MOD::PARAMS.modulus());
        CtOption::new(Self::from_uint_reduced(uint), is_some)
    }

    /// Convert a `u64` into a [`MontyFieldElement`], reducing it when the modulus is 64 bits
    /// or smaller.
    #[inline]
    pub const fn from_u64(w: u64) -> Self {
        Self::from_uint_reduced(&Uint::from_u64(w))
    }

    /// Create [`MontyFieldElement`] from a [`Uint`] which is already in Montgomery form.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is expected to be in Montgomery form and reduced. Failure to maintain these
    /// invariants will lead to miscomputation and potential security issues!
    #[inline]
    pub const fn from_montgomery(montgomery: Uint<LIMBS>) -> Self {
        Self {
            montgomery,
            params: PhantomData,
        }
    }

    /// Borrow the inner [`Uint`] type which is in Montgomery form.
    ///
    /// # ⚠️ Warning
    ///
    /// Make sure you are actually expecting a value in Montgomery form! This is not the correct
    /// function for converting *out* of Montgomery form: that would be
    /// [`MontyFieldElement::to_canonical`].
    pub const fn as_montgomery(&self) -> &Uint<LIMBS> {
        &self.montgomery
    }

    /// Returns the bytestring encoding of this field element.
    #[inline]
    pub fn to_bytes(self) -> FieldBytes<LIMBS> {
        let mut repr = FieldBytes::default();
        let canonical = self.to_canonical();

        match MOD::BYTE_ORDER {
            ByteOrder::BigEndian => canonical.write_be_bytes(repr.as_mut()),
            ByteOrder::LittleEndian => canonical.write_le_bytes(repr.as_mut()),
        }

        repr
    }

    /// Determine if this field element is odd: `self mod 2 == 1`.
    ///
    /// # Returns
    ///
    /// If odd, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        self.to_canonical().is_odd()
    }

    /// Determine if this field element is even: `self mod 2 == 0`.
    ///
    /// # Returns
    ///
    /// If even, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    #[inline]
    pub fn is_even(&self) -> Choice {
        !self.is_odd()
    }

    /// Determine if this field element is zero.
    ///
    /// # Returns
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Determine if this field element is one.
    #[inline]
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::ONE)
    }

    /// Is the canonical representative greater than `(p - 1) / 2`?
    ///
    /// Exactly one of `x` and `-x` is lexicographically largest when `x != 0`.
    #[inline]
    pub fn lexicographically_largest(&self) -> Choice {
        let half = const { MOD::PARAMS.modulus().wrapping_sub(&Uint::ONE).shr1().0 };
        self.to_canonical().ct_gt(&half)
    }

    /// Translate field element out of the Montgomery domain, returning a [`Uint`] in canonical form.
    #[inline]
    pub const fn to_canonical(self) -> Uint<LIMBS> {
        montgomery_mul(&self.montgomery, &Uint::ONE, &MOD::PARAMS)
    }

    /// Add elements.
    #[inline]
    pub const fn add(&self, rhs: &Self) -> Self {
        Self::from_montgomery(modular::add_mod(
            &self.montgomery,
            &rhs.montgomery,
            MOD::PARAMS.modulus(),
        ))
    }

    /// Double element (add it to itself).
    #[inline]
    #[must_use]
    pub const fn double(&self) -> Self {
        Self::from_montgomery(modular::double_mod(&self.montgomery, MOD::PARAMS.modulus()))
    }

    /// Halve element: `self / 2`.
    #[inline]
    #[must_use]
    pub const fn half(&self) -> Self {
        Self::from_montgomery(modular::half_mod(&self.montgomery, MOD::PARAMS.modulus()))
    }

    /// Subtract elements.
    #[inline]
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self::from_montgomery(modular::sub_mod(
            &self.montgomery,
            &rhs.montgomery,
            MOD::PARAMS.modulus(),
        ))
    }

    /// Multiply elements.
    #[inline]
    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self::from_montgomery(montgomery_mul(
            &self.montgomery,
            &rhs.montgomery,
            &MOD::PARAMS,
        ))
    }

    /// Negate element.
    #[inline]
    pub const fn neg(&self) -> Self {
        Self::from_montgomery(modular::neg_mod(&self.montgomery, MOD::PARAMS.modulus()))
    }

    /// Compute modular square.
    #[inline]
    #[must_use]
    pub const fn square(&self) -> Self {
        self.multiply(self)
    }

    /// Compute field inversion: `1 / self`.
    ///
    /// Uses Fermat's little theorem, `self^(p - 2)`, with a fixed exponent. For zero the
    /// result is `None` and its payload is zero.
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow_vartime(&Self::P_MINUS_2), !self.is_zero())
    }

    /// Compute field inversion, mapping zero to zero.
    #[inline]
    pub fn invert_or_zero(&self) -> Self {
        self.pow_vartime(&Self::P_MINUS_2)
    }

    /// Compute field inversion of a public value: `1 / value` in variable-time.
    #[inline]
    pub fn invert_vartime(value: Vartime<&Self>) -> CtOption<Self> {
        let canonical = value.get().to_canonical();
        match modular::inv_mod_vartime(Vartime::new(&canonical), MOD::PARAMS.modulus()) {
            Some(inv) => CtOption::new(Self::from_uint_reduced(&inv), Choice::from(1)),
            None => CtOption::new(Self::ZERO, Choice::from(0)),
        }
    }

    const P_MINUS_2: Uint<LIMBS> = MOD::PARAMS.modulus().wrapping_sub(&Uint::from_u64(2));

    /// Compute field inversion as a `const fn`. Panics if `self` is zero.
    ///
    /// This is mainly intended for inverting constants at compile time.
    pub const fn const_invert(&self) -> Self {
        assert!(
            !self.montgomery.is_zero_vartime(),
            "input to invert should be non-zero"
        );
        self.pow_vartime(&Self::P_MINUS_2)
    }

    /// Returns `self^exp`, where `exp` is a little-endian integer exponent.
    ///
    /// **This operation is variable time with respect to the exponent `exp`.**
    ///
    /// If `exp` is fixed, this operation is constant time. Note that `exp` will still be branched
    /// upon and should NOT be a secret.
    pub const fn pow_vartime<const RHS_LIMBS: usize>(&self, exp: &Uint<RHS_LIMBS>) -> Self {
        let mut i = RHS_LIMBS - 1;

        // Ignore "leading" zeros (in little endian)
        while i > 0 && exp.as_words()[i] == 0 {
            i -= 1;
        }

        let mut res = Self::ONE;

        loop {
            let mut j = Word::BITS;

            while j > 0 {
                j -= 1;
                res = res.square();

                if ((exp.as_words()[i] >> j) & 1) == 1 {
                    res = res.multiply(self);
                }
            }

            if i == 0 {
                return res;
            }

            i -= 1;
        }
    }

    /// Returns `self^(2^n) mod p`.
    ///
    /// **This operation is variable time with respect to the exponent `n`.**
    ///
    /// If the exponent is fixed, this operation is constant time.
    pub const fn sqn_vartime(&self, n: usize) -> Self {
        let mut x = *self;
        let mut i = 0;
        while i < n {
            x = x.square();
            i += 1;
        }
        x
    }

    /// Legendre symbol of `self`: `1` for non-zero squares, `-1` for non-squares and `0`
    /// for zero, computed in constant time.
    pub fn legendre(&self) -> i8 {
        let p_minus_1_over_2 =
            const { MOD::PARAMS.modulus().wrapping_sub(&Uint::ONE).shr1().0 };
        let symbol = self.pow_vartime(&p_minus_1_over_2);
        let is_one = symbol.is_one().unwrap_u8() as i8;
        let is_zero = symbol.is_zero().unwrap_u8() as i8;
        is_one - (1 - is_one - is_zero)
    }

    /// Is this element a square (including zero)?
    pub fn is_square(&self) -> Choice {
        let p_minus_1_over_2 =
            const { MOD::PARAMS.modulus().wrapping_sub(&Uint::ONE).shr1().0 };
        let symbol = self.pow_vartime(&p_minus_1_over_2);
        symbol.is_one() | symbol.is_zero()
    }

    /// Sample a uniformly random element, propagating any failure of the RNG.
    pub fn try_random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, rand_core::Error> {
        let excess_bits = Uint::<LIMBS>::BITS - MOD::PARAMS.modulus().bits_vartime();

        loop {
            let mut bytes = [[0u8; 8]; LIMBS];
            rng.try_fill_bytes(bytes.as_flattened_mut())?;

            let mut words = [0; LIMBS];
            for (word, chunk) in words.iter_mut().zip(bytes.iter()) {
                *word = Word::from_le_bytes(*chunk);
            }
            let candidate = Uint::from_words(words).shr_vartime(excess_bits);

            // Rejection here depends only on discarded candidates.
            if let Some(fe) = Self::from_uint(&candidate).into() {
                return Ok(fe);
            }
        }
    }
}

//
// `ff` crate trait impls
//

impl<MOD, const LIMBS: usize> Field for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        loop {
            if let Ok(fe) = Self::try_random(&mut rng) {
                return fe;
            }
        }
    }

    fn is_zero(&self) -> Choice {
        Self::ZERO.ct_eq(self)
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl<MOD, const LIMBS: usize> PrimeField for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    type Repr = FieldBytes<LIMBS>;

    const MODULUS: &'static str = MOD::MODULUS_HEX;
    const NUM_BITS: u32 = MOD::PARAMS.modulus().bits_vartime();
    const CAPACITY: u32 = Self::NUM_BITS - 1;
    const TWO_INV: Self = Self::from_u64(2).const_invert();
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(MOD::MULTIPLICATIVE_GENERATOR);
    const S: u32 = compute_s(MOD::PARAMS.modulus());
    const ROOT_OF_UNITY: Self = match MOD::ROOT_OF_UNITY {
        Some(root_of_unity) => Self::from_uint_reduced(&root_of_unity),
        None => Self::MULTIPLICATIVE_GENERATOR.pow_vartime(&MOD::T),
    };
    const ROOT_OF_UNITY_INV: Self = Self::ROOT_OF_UNITY.const_invert();
    const DELTA: Self = Self::MULTIPLICATIVE_GENERATOR.sqn_vartime(Self::S as usize);

    fn from_repr(bytes: Self::Repr) -> CtOption<Self> {
        Self::from_bytes(&bytes)
    }

    fn to_repr(&self) -> Self::Repr {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        self.is_odd()
    }
}

impl<MOD, const LIMBS: usize> CanonicalLimbs for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    type Limbs = Uint<LIMBS>;

    fn canonical_limbs(&self) -> Uint<LIMBS> {
        self.to_canonical()
    }
}

//
// Arithmetic trait impls
//

/// Emit a `core::ops` trait wrapper for an inherent method.
macro_rules! monty_field_op {
    ($op:tt, $func:ident, $inner_func:ident) => {
        impl<MOD, const LIMBS: usize> $op for MontyFieldElement<MOD, LIMBS>
        where
            MOD: MontyFieldParams<LIMBS>,
        {
            type Output = MontyFieldElement<MOD, LIMBS>;

            #[inline]
            fn $func(self, rhs: MontyFieldElement<MOD, LIMBS>) -> MontyFieldElement<MOD, LIMBS> {
                <MontyFieldElement<MOD, LIMBS>>::$inner_func(&self, &rhs)
            }
        }

        impl<MOD, const LIMBS: usize> $op<&Self> for MontyFieldElement<MOD, LIMBS>
        where
            MOD: MontyFieldParams<LIMBS>,
        {
            type Output = MontyFieldElement<MOD, LIMBS>;

            #[inline]
            fn $func(self, rhs: &MontyFieldElement<MOD, LIMBS>) -> MontyFieldElement<MOD, LIMBS> {
                <MontyFieldElement<MOD, LIMBS>>::$inner_func(&self, rhs)
            }
        }

        impl<MOD, const LIMBS: usize> $op<Self> for &MontyFieldElement<MOD, LIMBS>
        where
            MOD: MontyFieldParams<LIMBS>,
        {
            type Output = MontyFieldElement<MOD, LIMBS>;

            #[inline]
            fn $func(self, rhs: &MontyFieldElement<MOD, LIMBS>) -> MontyFieldElement<MOD, LIMBS> {
                <MontyFieldElement<MOD, LIMBS>>::$inner_func(self, rhs)
            }
        }
    };
}

monty_field_op!(Add, add, add);
monty_field_op!(Sub, sub, sub);
monty_field_op!(Mul, mul, multiply);

/// Emit `core::ops` assignment wrappers for a binary operator.
macro_rules! monty_field_assign_op {
    ($op:tt, $func:ident, $inner_op:tt) => {
        impl<MOD, const LIMBS: usize> $op<Self> for MontyFieldElement<MOD, LIMBS>
        where
            MOD: MontyFieldParams<LIMBS>,
        {
            #[inline]
            fn $func(&mut self, other: MontyFieldElement<MOD, LIMBS>) {
                *self = *self $inner_op other;
            }
        }

        impl<MOD, const LIMBS: usize> $op<&Self> for MontyFieldElement<MOD, LIMBS>
        where
            MOD: MontyFieldParams<LIMBS>,
        {
            #[inline]
            fn $func(&mut self, other: &MontyFieldElement<MOD, LIMBS>) {
                *self = *self $inner_op other;
            }
        }
    };
}

monty_field_assign_op!(AddAssign, add_assign, +);
monty_field_assign_op!(SubAssign, sub_assign, -);
monty_field_assign_op!(MulAssign, mul_assign, *);

impl<MOD, const LIMBS: usize> Neg for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    type Output = MontyFieldElement<MOD, LIMBS>;

    #[inline]
    fn neg(self) -> MontyFieldElement<MOD, LIMBS> {
        <MontyFieldElement<MOD, LIMBS>>::neg(&self)
    }
}

impl<MOD, const LIMBS: usize> Neg for &MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    type Output = MontyFieldElement<MOD, LIMBS>;

    #[inline]
    fn neg(self) -> MontyFieldElement<MOD, LIMBS> {
        <MontyFieldElement<MOD, LIMBS>>::neg(self)
    }
}

impl<MOD, const LIMBS: usize> Sum for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or(Self::ZERO)
    }
}

impl<'a, MOD, const LIMBS: usize> Sum<&'a Self> for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn sum<I: Iterator<Item = &'a MontyFieldElement<MOD, LIMBS>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<MOD, const LIMBS: usize> Product for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Mul::mul).unwrap_or(Self::ONE)
    }
}

impl<'a, MOD: MontyFieldParams<LIMBS>, const LIMBS: usize>
    Product<&'a MontyFieldElement<MOD, LIMBS>> for MontyFieldElement<MOD, LIMBS>
{
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}

//
// `subtle` trait impls
//

impl<MOD, const LIMBS: usize> ConditionallySelectable for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::from_montgomery(Uint::conditional_select(
            &a.montgomery,
            &b.montgomery,
            choice,
        ))
    }
}

impl<MOD, const LIMBS: usize> ConstantTimeEq for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        self.montgomery.ct_eq(&other.montgomery)
    }
}

impl<MOD, const LIMBS: usize> ConstantTimeGreater for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn ct_gt(&self, other: &Self) -> Choice {
        self.to_canonical().ct_gt(&other.to_canonical())
    }
}

impl<MOD, const LIMBS: usize> ConstantTimeLess for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn ct_lt(&self, other: &Self) -> Choice {
        self.to_canonical().ct_lt(&other.to_canonical())
    }
}

//
// `core::fmt` trait impls
//

impl<MOD, const LIMBS: usize> fmt::Debug for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical();
        write!(
            f,
            "MontyFieldElement<p={}>(0x{:X})",
            MOD::MODULUS_HEX,
            canonical
        )
    }
}

impl<MOD, const LIMBS: usize> fmt::Display for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl<MOD, const LIMBS: usize> fmt::LowerHex for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_canonical(), f)
    }
}

impl<MOD, const LIMBS: usize> fmt::UpperHex for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.to_canonical(), f)
    }
}

//
// Miscellaneous trait impls
//

impl<MOD, const LIMBS: usize> Default for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<MOD: MontyFieldParams<LIMBS>, const LIMBS: usize> DefaultIsZeroes
    for MontyFieldElement<MOD, LIMBS>
{
}

impl<MOD: MontyFieldParams<LIMBS>, const LIMBS: usize> Eq for MontyFieldElement<MOD, LIMBS> {}
impl<MOD: MontyFieldParams<LIMBS>, const LIMBS: usize> PartialEq for MontyFieldElement<MOD, LIMBS> {
    fn eq(&self, rhs: &Self) -> bool {
        self.ct_eq(rhs).into()
    }
}

impl<MOD, const LIMBS: usize> From<u32> for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    #[inline]
    fn from(n: u32) -> MontyFieldElement<MOD, LIMBS> {
        Self::from_uint_reduced(&Uint::from_u64(n.into()))
    }
}

impl<MOD, const LIMBS: usize> From<u64> for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    #[inline]
    fn from(n: u64) -> MontyFieldElement<MOD, LIMBS> {
        Self::from_uint_reduced(&Uint::from_u64(n))
    }
}

impl<MOD, const LIMBS: usize> From<MontyFieldElement<MOD, LIMBS>> for FieldBytes<LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn from(fe: MontyFieldElement<MOD, LIMBS>) -> Self {
        fe.to_bytes()
    }
}

impl<MOD, const LIMBS: usize> From<MontyFieldElement<MOD, LIMBS>> for Uint<LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    fn from(fe: MontyFieldElement<MOD, LIMBS>) -> Uint<LIMBS> {
        fe.to_canonical()
    }
}

impl<MOD: MontyFieldParams<LIMBS>, const LIMBS: usize> Ord for MontyFieldElement<MOD, LIMBS> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_canonical().cmp(&other.to_canonical())
    }
}

impl<MOD: MontyFieldParams<LIMBS>, const LIMBS: usize> PartialOrd
    for MontyFieldElement<MOD, LIMBS>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute `S = (modulus - 1).trailing_zeros()`
pub const fn compute_s<const LIMBS: usize>(modulus: &Uint<LIMBS>) -> u32 {
    modulus.wrapping_sub(&Uint::ONE).trailing_zeros_vartime()
}

/// Compute `t = (modulus - 1) >> S`
pub const fn compute_t<const LIMBS: usize>(modulus: &Uint<LIMBS>) -> Uint<LIMBS> {
    modulus
        .wrapping_sub(&Uint::ONE)
        .shr_vartime(compute_s(modulus))
}

#[cfg(test)]
mod tests {
    use super::MontyFieldElement;
    use crate::{ByteOrder, MontyFieldParams, monty_field_params, test_primefield};
    use bigint::{U256, Vartime};
    use ff::{Field, PrimeField};

    // Example modulus: P-256 base field.
    // p = 2^{224}(2^{32} − 1) + 2^{192} + 2^{96} − 1
    monty_field_params!(
        name: FieldParams,
        modulus: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        uint: U256,
        byte_order: ByteOrder::BigEndian,
        multiplicative_generator: 6,
        doc: "P-256 field modulus"
    );

    /// P-256 field element
    type FieldElement = MontyFieldElement<FieldParams, { U256::LIMBS }>;

    test_primefield!(FieldElement, U256);

    #[test]
    fn modulus_bits_constant() {
        assert_eq!(FieldElement::NUM_BITS, 256);
    }

    #[test]
    fn s_constant() {
        assert_eq!(FieldElement::S, 1);
    }

    #[test]
    fn computed_delta_constant() {
        assert_eq!(FieldElement::DELTA, FieldElement::from_u64(36));
    }

    #[test]
    fn canonical_round_trip() {
        let n = U256::from_be_hex("1234567890abcdef1234567890abcdef");
        let fe = FieldElement::from_uint(&n).unwrap();
        assert_eq!(fe.to_canonical(), n);
        assert_eq!(FieldElement::from_bytes(&fe.to_bytes()).unwrap(), fe);
    }

    #[test]
    fn from_uint_rejects_modulus() {
        let modulus = FieldParams::PARAMS.modulus();
        assert!(bool::from(FieldElement::from_uint(modulus).is_none()));
        assert_eq!(FieldElement::from_uint_reduced(modulus), FieldElement::ZERO);
    }

    #[test]
    fn half_is_inverse_of_double() {
        let x = FieldElement::from_u64(7);
        assert_eq!(x.half().double(), x);
        assert_eq!(x.half(), x * FieldElement::TWO_INV);
    }

    #[test]
    fn invert_zero_is_none_with_zero_payload() {
        let inv = FieldElement::ZERO.invert();
        assert!(bool::from(inv.is_none()));
        assert_eq!(FieldElement::ZERO.invert_or_zero(), FieldElement::ZERO);
        assert!(bool::from(
            FieldElement::invert_vartime(Vartime::new(&FieldElement::ZERO)).is_none()
        ));
    }

    #[test]
    fn invert_vartime_matches_invert() {
        let x = FieldElement::from_u64(0xdead_beef);
        assert_eq!(
            FieldElement::invert_vartime(Vartime::new(&x)).unwrap(),
            x.invert().unwrap()
        );
    }

    #[test]
    fn legendre_symbol() {
        assert_eq!(FieldElement::ZERO.legendre(), 0);
        assert_eq!(FieldElement::from_u64(4).legendre(), 1);
        assert_eq!(FieldElement::MULTIPLICATIVE_GENERATOR.legendre(), -1);
        assert!(bool::from(FieldElement::from_u64(9).is_square()));
    }

    #[test]
    fn wide_reduction() {
        // 2^256 mod p, encoded as a 33 byte big-endian string.
        let mut bytes = [0u8; 33];
        bytes[0] = 1;
        let r = U256::ZERO.wrapping_sub(FieldParams::PARAMS.modulus());
        let expected = FieldElement::from_uint_reduced(&r);
        assert_eq!(FieldElement::from_be_bytes_wide(&bytes), expected);

        let small = FieldElement::from_be_bytes_wide(&[0x01, 0x00]);
        assert_eq!(small, FieldElement::from_u64(256));
    }

    #[test]
    fn lexicographic_order() {
        let one = FieldElement::ONE;
        assert!(!bool::from(one.lexicographically_largest()));
        assert!(bool::from((-one).lexicographically_largest()));
        assert!(!bool::from(FieldElement::ZERO.lexicographically_largest()));
    }

    #[test]
    fn random_is_reduced() {
        use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..32 {
            let x = FieldElement::random(&mut rng);
            assert!(&x.to_canonical() < FieldParams::PARAMS.modulus());
        }
    }
}
