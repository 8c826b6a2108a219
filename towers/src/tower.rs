//! Arithmetic surface shared by every level of a tower.

use core::{
    fmt::Debug,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use primefield::{MontyFieldElement, MontyFieldParams};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// A field which can serve as the base of an extension.
///
/// Implemented for prime fields (where the Frobenius map is the identity) and for both
/// extension constructors in this crate.
pub trait TowerField:
    Copy
    + Default
    + Debug
    + Eq
    + Send
    + Sync
    + 'static
    + ConditionallySelectable
    + ConstantTimeEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Square this element.
    fn square(&self) -> Self;

    /// Double this element.
    fn double(&self) -> Self;

    /// Invert this element; `None` for zero.
    fn invert(&self) -> CtOption<Self>;

    /// Is this element zero?
    fn is_zero(&self) -> Choice;

    /// Raise to the power `p^power`, where `p` is the characteristic.
    fn frobenius_map(&self, power: usize) -> Self;

    /// Raise to a public little-endian exponent.
    fn pow_vartime<S: AsRef<[u64]>>(&self, exp: S) -> Self {
        let mut res = Self::ONE;
        for limb in exp.as_ref().iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if (limb >> i) & 1 == 1 {
                    res *= *self;
                }
            }
        }
        res
    }
}

impl<MOD, const LIMBS: usize> TowerField for MontyFieldElement<MOD, LIMBS>
where
    MOD: MontyFieldParams<LIMBS>,
{
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    #[inline]
    fn square(&self) -> Self {
        Self::square(self)
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn invert(&self) -> CtOption<Self> {
        Self::invert(self)
    }

    #[inline]
    fn is_zero(&self) -> Choice {
        Self::is_zero(self)
    }

    #[inline]
    fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }
}
