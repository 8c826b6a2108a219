//! Cubic extensions `F[v] / (v^3 - ξ)`.

use crate::TowerField;
use core::fmt;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Parameters of a cubic extension.
pub trait CubicParams: Copy + fmt::Debug + Default + Eq + Send + Sync + 'static {
    /// Field being extended.
    type Base: TowerField;

    /// Multiply a base field element by the non-residue `ξ`.
    fn mul_by_nonresidue(x: &Self::Base) -> Self::Base;

    /// Multiply the `v` coefficient of an element raised to `p^power` by `ξ^((p^power - 1) / 3)`.
    fn frobenius_c1(c1: &Self::Base, power: usize) -> Self::Base;

    /// Multiply the `v^2` coefficient of an element raised to `p^power` by
    /// `ξ^(2 (p^power - 1) / 3)`.
    fn frobenius_c2(c2: &Self::Base, power: usize) -> Self::Base;
}

/// Element `c0 + c1 * v + c2 * v^2` of a cubic extension.
#[derive(Clone, Copy)]
pub struct CubicExtension<P: CubicParams> {
    /// Constant coefficient.
    pub c0: P::Base,

    /// Coefficient of `v`.
    pub c1: P::Base,

    /// Coefficient of `v^2`.
    pub c2: P::Base,
}

impl<P: CubicParams> CubicExtension<P> {
    /// Additive identity.
    pub const ZERO: Self = Self::new(P::Base::ZERO, P::Base::ZERO, P::Base::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self::new(P::Base::ONE, P::Base::ZERO, P::Base::ZERO);

    /// Create an element from its coefficients.
    #[inline]
    pub const fn new(c0: P::Base, c1: P::Base, c2: P::Base) -> Self {
        Self { c0, c1, c2 }
    }

    /// Add elements.
    #[inline]
    pub fn add(&self, rhs: &Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }

    /// Subtract elements.
    #[inline]
    pub fn sub(&self, rhs: &Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }

    /// Negate element.
    #[inline]
    pub fn neg(&self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }

    /// Double element.
    #[inline]
    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double(), self.c2.double())
    }

    /// Karatsuba multiplication (six base multiplications).
    pub fn mul(&self, rhs: &Self) -> Self {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);
        let (b0, b1, b2) = (rhs.c0, rhs.c1, rhs.c2);

        let t0 = a0 * b0;
        let t1 = a1 * b1;
        let t2 = a2 * b2;

        let c0 = P::mul_by_nonresidue(&((a1 + a2) * (b1 + b2) - t1 - t2)) + t0;
        let c1 = (a0 + a1) * (b0 + b1) - t0 - t1 + P::mul_by_nonresidue(&t2);
        let c2 = (a0 + a2) * (b0 + b2) - t0 - t2 + t1;
        Self::new(c0, c1, c2)
    }

    /// Chung-Hasan SQR2 squaring.
    pub fn square(&self) -> Self {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);

        let s0 = a0.square();
        let s1 = (a0 * a1).double();
        let s2 = (a0 - a1 + a2).square();
        let s3 = (a1 * a2).double();
        let s4 = a2.square();

        let c0 = P::mul_by_nonresidue(&s3) + s0;
        let c1 = P::mul_by_nonresidue(&s4) + s1;
        let c2 = s1 + s2 + s3 - s0 - s4;
        Self::new(c0, c1, c2)
    }

    /// Invert element; `None` for zero.
    pub fn invert(&self) -> CtOption<Self> {
        let (a0, a1, a2) = (self.c0, self.c1, self.c2);

        let t0 = a0.square() - P::mul_by_nonresidue(&(a1 * a2));
        let t1 = P::mul_by_nonresidue(&a2.square()) - a0 * a1;
        let t2 = a1.square() - a0 * a2;

        let d = a0 * t0 + P::mul_by_nonresidue(&(a2 * t1)) + P::mul_by_nonresidue(&(a1 * t2));
        d.invert().map(|d| Self::new(t0 * d, t1 * d, t2 * d))
    }

    /// Multiply by the sparse element `c1 * v`.
    pub fn mul_by_1(&self, c1: &P::Base) -> Self {
        Self::new(
            P::mul_by_nonresidue(&(self.c2 * c1)),
            self.c0 * c1,
            self.c1 * c1,
        )
    }

    /// Multiply by the sparse element `c0 + c1 * v`.
    pub fn mul_by_01(&self, c0: &P::Base, c1: &P::Base) -> Self {
        let aa = self.c0 * c0;
        let bb = self.c1 * c1;

        let t1 = P::mul_by_nonresidue(&(self.c2 * c1)) + aa;
        let t2 = (*c0 + c1) * (self.c0 + self.c1) - aa - bb;
        let t3 = self.c2 * c0 + bb;
        Self::new(t1, t2, t3)
    }

    /// Multiply by `v`.
    #[inline]
    pub fn mul_by_v(&self) -> Self {
        Self::new(P::mul_by_nonresidue(&self.c2), self.c0, self.c1)
    }

    /// Multiply by a base field element.
    #[inline]
    pub fn mul_by_base(&self, rhs: &P::Base) -> Self {
        Self::new(self.c0 * rhs, self.c1 * rhs, self.c2 * rhs)
    }

    /// Is this element zero?
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// Raise to the power `p^power`.
    pub fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            P::frobenius_c1(&self.c1.frobenius_map(power), power),
            P::frobenius_c2(&self.c2.frobenius_map(power), power),
        )
    }

    #[inline]
    fn select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            P::Base::conditional_select(&a.c0, &b.c0, choice),
            P::Base::conditional_select(&a.c1, &b.c1, choice),
            P::Base::conditional_select(&a.c2, &b.c2, choice),
        )
    }

    #[inline]
    fn ct_eq_inner(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl<P: CubicParams> fmt::Debug for CubicExtension<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*v + {:?}*v^2", self.c0, self.c1, self.c2)
    }
}

impl_extension_ops!(CubicExtension, CubicParams);
