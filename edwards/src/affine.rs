//! Affine curve points.

use crate::{EdwardsParams, ExtendedPoint};
use core::{
    borrow::Borrow,
    ops::{Mul, Neg},
};
use ff::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Point on a twisted Edwards curve in affine coordinates.
///
/// The identity `(0, 1)` is an ordinary curve point, so no infinity flag is needed.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint<C: EdwardsParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
}

impl<C> AffinePoint<C>
where
    C: EdwardsParams,
{
    /// The identity point.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ZERO,
        y: C::FieldElement::ONE,
    };

    /// Generator of the prime order subgroup.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
    };

    /// Create a point from its coordinates, checking the curve equation.
    pub fn new(x: C::FieldElement, y: C::FieldElement) -> CtOption<Self> {
        let point = Self::new_unchecked(x, y);
        CtOption::new(point, point.is_on_curve())
    }

    /// Create a point from coordinates known to satisfy the curve equation.
    pub const fn new_unchecked(x: C::FieldElement, y: C::FieldElement) -> Self {
        Self { x, y }
    }

    /// Recover a point from its x-coordinate using `y^2 = (1 - a*x^2) / (1 - d*x^2)`.
    ///
    /// The sign of `y` is whichever root the field's square root produces.
    pub fn from_x(x: C::FieldElement) -> CtOption<Self> {
        let xx = x.square();
        let num = C::FieldElement::ONE - C::EQUATION_A * xx;
        let den = C::FieldElement::ONE - C::EQUATION_D * xx;
        let (is_square, y) = C::FieldElement::sqrt_ratio(&num, &den);
        CtOption::new(Self::new_unchecked(x, y), is_square & !den.is_zero())
    }

    /// The x-coordinate.
    pub fn x(&self) -> C::FieldElement {
        self.x
    }

    /// The y-coordinate.
    pub fn y(&self) -> C::FieldElement {
        self.y
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&C::FieldElement::ONE)
    }

    /// Does `a*x^2 + y^2 = 1 + d*x^2*y^2` hold?
    pub fn is_on_curve(&self) -> Choice {
        let xx = self.x.square();
        let yy = self.y.square();
        let lhs = C::EQUATION_A * xx + yy;
        let rhs = C::FieldElement::ONE + C::EQUATION_D * xx * yy;
        lhs.ct_eq(&rhs)
    }

    /// Returns `-self`, i.e. `(-x, y)`.
    pub fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
        }
    }

    /// Convert to extended coordinates.
    pub fn to_extended(&self) -> ExtendedPoint<C> {
        ExtendedPoint {
            x: self.x,
            y: self.y,
            z: C::FieldElement::ONE,
            t: self.x * self.y,
        }
    }
}

impl<C> ConditionallySelectable for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl<C> ConstantTimeEq for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl<C> Default for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for AffinePoint<C> where C: EdwardsParams {}

impl<C> Eq for AffinePoint<C> where C: EdwardsParams {}

impl<C> PartialEq for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<ExtendedPoint<C>> for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn from(p: ExtendedPoint<C>) -> Self {
        p.to_affine()
    }
}

impl<C> From<&ExtendedPoint<C>> for AffinePoint<C>
where
    C: EdwardsParams,
{
    fn from(p: &ExtendedPoint<C>) -> Self {
        p.to_affine()
    }
}

impl<C, S> Mul<S> for AffinePoint<C>
where
    C: EdwardsParams,
    S: Borrow<C::Scalar>,
{
    type Output = ExtendedPoint<C>;

    fn mul(self, scalar: S) -> ExtendedPoint<C> {
        ExtendedPoint::mul(&self.to_extended(), scalar.borrow())
    }
}

impl<C> Neg for AffinePoint<C>
where
    C: EdwardsParams,
{
    type Output = Self;

    fn neg(self) -> Self {
        AffinePoint::neg(&self)
    }
}

impl<C> Neg for &AffinePoint<C>
where
    C: EdwardsParams,
{
    type Output = AffinePoint<C>;

    fn neg(self) -> AffinePoint<C> {
        AffinePoint::neg(self)
    }
}
