//! Affine curve points.

#![allow(clippy::op_ref)]

use crate::{CurveParams, ExtendedJacobianPoint, JacobianPoint, ProjectivePoint};
use core::{
    borrow::Borrow,
    ops::{Mul, Neg},
};
use ff::Field;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// Point on a Weierstrass curve in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint<C: CurveParams> {
    /// x-coordinate
    pub(crate) x: C::FieldElement,

    /// y-coordinate
    pub(crate) y: C::FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead to permit `const`
    /// constructors for `IDENTITY` and `GENERATOR`.
    pub(crate) infinity: u8,
}

impl<C> AffinePoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ZERO,
        y: C::FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        infinity: 0,
    };

    /// Create a point from its coordinates, checking the curve equation.
    pub fn new(x: C::FieldElement, y: C::FieldElement) -> CtOption<Self> {
        let point = Self::new_unchecked(x, y);
        CtOption::new(point, point.is_on_curve())
    }

    /// Create a point from coordinates known to satisfy the curve equation.
    ///
    /// Intended for constants. Arithmetic on an off-curve point is meaningless.
    pub const fn new_unchecked(x: C::FieldElement, y: C::FieldElement) -> Self {
        Self { x, y, infinity: 0 }
    }

    /// Evaluate the right-hand side of the curve equation, `x^3 + a*x + b`.
    pub fn y_squared(x: &C::FieldElement) -> C::FieldElement {
        (x.square() + C::EQUATION_A) * x + C::EQUATION_B
    }

    /// Recover a point from its x-coordinate.
    ///
    /// The returned point carries whichever square root `sqrt` produces; callers fix the sign
    /// with [`AffinePoint::conditional_negate`].
    pub fn from_x(x: C::FieldElement) -> CtOption<Self> {
        Self::y_squared(&x)
            .sqrt()
            .map(|y| Self::new_unchecked(x, y))
    }

    /// Sample a uniformly random point of the full curve group, which for curves with a
    /// cofactor is generally outside the prime order subgroup.
    ///
    /// Rejection sampling on the x-coordinate: the number of iterations depends only on the
    /// random values drawn.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = C::FieldElement::random(&mut rng);
            let flip = Choice::from((rng.next_u32() & 1) as u8);
            if let Some(mut point) = Option::<Self>::from(Self::from_x(x)) {
                point.conditional_negate(flip);
                return point;
            }
        }
    }

    /// The x-coordinate, or zero for the point at infinity.
    pub fn x(&self) -> C::FieldElement {
        self.x
    }

    /// The y-coordinate, or zero for the point at infinity.
    pub fn y(&self) -> C::FieldElement {
        self.y
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Does this point satisfy the curve equation? The point at infinity does.
    pub fn is_on_curve(&self) -> Choice {
        self.y.square().ct_eq(&Self::y_squared(&self.x)) | self.is_identity()
    }

    /// Negate `self` if `choice` is set.
    pub fn conditional_negate(&mut self, choice: Choice) {
        let neg = -self.y;
        self.y.conditional_assign(&neg, choice);
    }

    /// Convert to projective coordinates.
    pub fn to_projective(&self) -> ProjectivePoint<C> {
        ProjectivePoint::from(*self)
    }
}

impl<C> ConditionallySelectable for AffinePoint<C>
where
    C: CurveParams,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C> ConstantTimeEq for AffinePoint<C>
where
    C: CurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let same = self.x.ct_eq(&other.x)
            & self.y.ct_eq(&other.y)
            & self.infinity.ct_eq(&other.infinity);
        both_identity | same
    }
}

impl<C> Default for AffinePoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for AffinePoint<C> where C: CurveParams {}

impl<C> Eq for AffinePoint<C> where C: CurveParams {}

impl<C> PartialEq for AffinePoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<ProjectivePoint<C>> for AffinePoint<C>
where
    C: CurveParams,
{
    fn from(p: ProjectivePoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

impl<C> From<&ProjectivePoint<C>> for AffinePoint<C>
where
    C: CurveParams,
{
    fn from(p: &ProjectivePoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

impl<C> From<JacobianPoint<C>> for AffinePoint<C>
where
    C: CurveParams,
{
    fn from(p: JacobianPoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

impl<C> From<ExtendedJacobianPoint<C>> for AffinePoint<C>
where
    C: CurveParams,
{
    fn from(p: ExtendedJacobianPoint<C>) -> AffinePoint<C> {
        p.to_affine()
    }
}

//
// Arithmetic trait impls
//

impl<C, S> Mul<S> for AffinePoint<C>
where
    C: CurveParams,
    S: Borrow<C::Scalar>,
{
    type Output = ProjectivePoint<C>;

    fn mul(self, scalar: S) -> ProjectivePoint<C> {
        ProjectivePoint::<C>::from(self) * scalar.borrow()
    }
}

impl<C> Neg for AffinePoint<C>
where
    C: CurveParams,
{
    type Output = Self;

    fn neg(self) -> Self {
        AffinePoint {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

impl<C> Neg for &AffinePoint<C>
where
    C: CurveParams,
{
    type Output = AffinePoint<C>;

    fn neg(self) -> AffinePoint<C> {
        -(*self)
    }
}
