//! Quadratic extensions `F[u] / (u^2 - β)`.

use crate::{
    TowerField,
    cubic::{CubicExtension, CubicParams},
};
use core::fmt;
use ff::{Field, PrimeField};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Parameters of a quadratic extension.
pub trait QuadraticParams: Copy + fmt::Debug + Default + Eq + Send + Sync + 'static {
    /// Field being extended.
    type Base: TowerField;

    /// Multiply a base field element by the non-residue `β`.
    fn mul_by_nonresidue(x: &Self::Base) -> Self::Base;

    /// Multiply the `u` coefficient of an element raised to `p^power` by `β^((p^power - 1) / 2)`.
    fn frobenius_c1(c1: &Self::Base, power: usize) -> Self::Base;
}

/// Extra parameters which make a quadratic extension of a prime field an [`ff::Field`].
pub trait QuadraticFieldParams: QuadraticParams<Base: PrimeField> {
    /// `c0` of a fixed non-square in the extension.
    const NON_SQUARE_C0: Self::Base;

    /// `c1` of a fixed non-square in the extension.
    const NON_SQUARE_C1: Self::Base;
}

/// Element `c0 + c1 * u` of a quadratic extension.
#[derive(Clone, Copy)]
pub struct QuadraticExtension<P: QuadraticParams> {
    /// Constant coefficient.
    pub c0: P::Base,

    /// Coefficient of `u`.
    pub c1: P::Base,
}

impl<P: QuadraticParams> QuadraticExtension<P> {
    /// Additive identity.
    pub const ZERO: Self = Self::new(P::Base::ZERO, P::Base::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self::new(P::Base::ONE, P::Base::ZERO);

    /// Create an element from its coefficients.
    #[inline]
    pub const fn new(c0: P::Base, c1: P::Base) -> Self {
        Self { c0, c1 }
    }

    /// Embed a base field element.
    #[inline]
    pub const fn from_base(c0: P::Base) -> Self {
        Self::new(c0, P::Base::ZERO)
    }

    /// Add elements.
    #[inline]
    pub fn add(&self, rhs: &Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }

    /// Subtract elements.
    #[inline]
    pub fn sub(&self, rhs: &Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }

    /// Negate element.
    #[inline]
    pub fn neg(&self) -> Self {
        Self::new(-self.c0, -self.c1)
    }

    /// Double element.
    #[inline]
    pub fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    /// Karatsuba multiplication.
    pub fn mul(&self, rhs: &Self) -> Self {
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        let c0 = v0 + P::mul_by_nonresidue(&v1);
        Self::new(c0, c1)
    }

    /// Complex squaring: `(a0 + a1)(a0 + β a1) - (1 + β) a0 a1`.
    pub fn square(&self) -> Self {
        let v0 = self.c0 * self.c1;
        let t = (self.c0 + self.c1) * (self.c0 + P::mul_by_nonresidue(&self.c1));
        let c0 = t - v0 - P::mul_by_nonresidue(&v0);
        Self::new(c0, v0.double())
    }

    /// Multiply by a base field element.
    #[inline]
    pub fn mul_by_base(&self, rhs: &P::Base) -> Self {
        Self::new(self.c0 * rhs, self.c1 * rhs)
    }

    /// Conjugate: `c0 - c1 * u`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Norm down to the base field: `c0^2 - β c1^2`.
    #[inline]
    pub fn norm(&self) -> P::Base {
        self.c0.square() - P::mul_by_nonresidue(&self.c1.square())
    }

    /// Invert element; `None` for zero.
    pub fn invert(&self) -> CtOption<Self> {
        self.norm()
            .invert()
            .map(|t| Self::new(self.c0 * t, -(self.c1 * t)))
    }

    /// Is this element zero?
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Raise to the power `p^power`.
    pub fn frobenius_map(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius_map(power);
        let c1 = self.c1.frobenius_map(power);
        Self::new(c0, P::frobenius_c1(&c1, power))
    }

    #[inline]
    fn select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self::new(
            P::Base::conditional_select(&a.c0, &b.c0, choice),
            P::Base::conditional_select(&a.c1, &b.c1, choice),
        )
    }

    #[inline]
    fn ct_eq_inner(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl<C: CubicParams, P: QuadraticParams<Base = CubicExtension<C>>> QuadraticExtension<P> {
    /// Multiply by the sparse element `(c0 + c1 v) + (c4 v) w` of the tower
    /// `(F[v] / (v^3 - ξ))[w] / (w^2 - v)`.
    ///
    /// Indices number the six `F` coefficients in storage order, so `4` is `c1.c1`.
    pub fn mul_by_014(&self, c0: &C::Base, c1: &C::Base, c4: &C::Base) -> Self {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = *c1 + c4;
        let c1 = (self.c1 + self.c0).mul_by_01(c0, &o) - aa - bb;
        let c0 = P::mul_by_nonresidue(&bb) + aa;
        Self::new(c0, c1)
    }
}

impl<P: QuadraticParams> fmt::Debug for QuadraticExtension<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl_extension_ops!(QuadraticExtension, QuadraticParams);

//
// `ff` crate trait impls
//

impl<P: QuadraticFieldParams> QuadraticExtension<P> {
    /// Square root using the norm map.
    ///
    /// With `n = c0^2 - β c1^2`, a root `x0 + x1 u` satisfies `x0^2 = (c0 ± sqrt(n)) / 2` and
    /// `x1 = c1 / (2 x0)`; when `x0 = 0`, `x1 = sqrt(c0 / β)`. A zero candidate for `x0^2` is
    /// only taken when the other one is not a square. The candidate is verified at the end, so
    /// no branch depends on the input.
    pub fn sqrt(&self) -> CtOption<Self> {
        let zero = <P::Base as Field>::ZERO;
        let n = self.norm();
        let s = Field::sqrt(&n).unwrap_or(zero);

        let t_plus = (self.c0 + s) * P::Base::TWO_INV;
        let t_minus = (self.c0 - s) * P::Base::TWO_INV;
        let plus_is_square = Field::sqrt(&t_plus).is_some() & !Field::is_zero(&t_plus);
        let t = P::Base::conditional_select(&t_minus, &t_plus, plus_is_square);

        let x0 = Field::sqrt(&t).unwrap_or(zero);
        let x1 = self.c1 * Field::invert(&Field::double(&x0)).unwrap_or(zero);

        let beta = P::mul_by_nonresidue(&<P::Base as Field>::ONE);
        let beta_inv = Field::invert(&beta).unwrap_or(zero);
        let x1_alt = Field::sqrt(&(self.c0 * beta_inv)).unwrap_or(zero);
        let x1 = P::Base::conditional_select(&x1, &x1_alt, Field::is_zero(&x0));

        let root = Self::new(x0, x1);
        CtOption::new(root, Self::square(&root).ct_eq_inner(self))
    }
}

impl<P: QuadraticFieldParams> Field for QuadraticExtension<P> {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        Self::new(P::Base::random(&mut rng), P::Base::random(&mut rng))
    }

    fn square(&self) -> Self {
        Self::square(self)
    }

    fn double(&self) -> Self {
        Self::double(self)
    }

    fn invert(&self) -> CtOption<Self> {
        Self::invert(self)
    }

    fn sqrt(&self) -> CtOption<Self> {
        Self::sqrt(self)
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        let non_square = Self::new(P::NON_SQUARE_C0, P::NON_SQUARE_C1);
        let div_is_zero = Self::is_zero(div);
        let ratio = Self::mul(num, &Self::invert(div).unwrap_or(Self::ZERO));

        let root = Self::sqrt(&ratio);
        let is_square = root.is_some();
        let alt = Self::sqrt(&Self::mul(&ratio, &non_square)).unwrap_or(Self::ZERO);
        let result = Self::select(&alt, &root.unwrap_or(Self::ZERO), is_square);

        let num_is_zero = Self::is_zero(num);
        let is_square = (is_square & !div_is_zero) | num_is_zero;
        (is_square, Self::select(&result, &Self::ZERO, div_is_zero))
    }
}
