//! Extended twisted Edwards coordinates.

#![allow(clippy::op_ref)]

use crate::{AffinePoint, EdwardsParams};
use core::{
    borrow::Borrow,
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use ff::Field;
use group::{Curve, Group};
use rand_core::RngCore;
use scalarmul::{Bucket, VartimeGroup};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

#[cfg(feature = "alloc")]
use {
    alloc::{vec, vec::Vec},
    scalarmul::{Vartime, Word},
};

/// Window width used by [`ExtendedPoint::mul_vartime`].
#[cfg(feature = "alloc")]
const WNAF_WINDOW: usize = 5;

/// Point on a twisted Edwards curve in extended coordinates `(X : Y : Z : T)` where
/// `x = X/Z`, `y = Y/Z` and `XY = ZT`.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedPoint<C: EdwardsParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) z: C::FieldElement,
    pub(crate) t: C::FieldElement,
}

impl<C> ExtendedPoint<C>
where
    C: EdwardsParams,
{
    /// The identity point `(0 : 1 : 1 : 0)`.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ZERO,
        y: C::FieldElement::ONE,
        z: C::FieldElement::ONE,
        t: C::FieldElement::ZERO,
    };

    /// Generator of the prime order subgroup.
    pub fn generator() -> Self {
        AffinePoint::GENERATOR.to_extended()
    }

    /// Projective coordinates `(X, Y, Z)`, without the auxiliary `T`.
    pub fn to_coordinates(&self) -> (C::FieldElement, C::FieldElement, C::FieldElement) {
        (self.x, self.y, self.z)
    }

    /// Convert this point to an [`AffinePoint`].
    pub fn to_affine(&self) -> AffinePoint<C> {
        self.to_affine_internal(self.z.invert().unwrap_or(C::FieldElement::ZERO))
    }

    fn to_affine_internal(self, zinv: C::FieldElement) -> AffinePoint<C> {
        AffinePoint {
            x: self.x * zinv,
            y: self.y * zinv,
        }
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&self.z)
    }

    /// Check if this point is on the curve
    pub fn is_on_curve(&self) -> Choice {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz = self.z.square();

        // (aX^2 + Y^2) Z^2 == Z^4 + d X^2 Y^2
        let lhs = (C::EQUATION_A * xx + yy) * zz;
        let rhs = zz.square() + C::EQUATION_D * xx * yy;

        (self.x * self.y).ct_eq(&(self.z * self.t)) & lhs.ct_eq(&rhs) & !self.z.is_zero()
    }

    /// The same point with coordinates scaled by a non-zero `lambda`.
    pub fn rescale(&self, lambda: &C::FieldElement) -> Self {
        Self {
            x: self.x * lambda,
            y: self.y * lambda,
            z: self.z * lambda,
            t: self.t * lambda,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Add two points (add-2008-hwcd).
    pub fn add(&self, other: &Self) -> Self {
        let a = self.x * other.x;
        let b = self.y * other.y;
        let c = C::EQUATION_D * self.t * other.t;
        let d = self.z * other.z;
        Self::add_finish(self, other.x + other.y, a, b, c, d)
    }

    /// Add an affine point (madd-2008-hwcd, `Z2 = 1`).
    pub fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        let a = self.x * other.x;
        let b = self.y * other.y;
        let c = C::EQUATION_D * self.t * (other.x * other.y);
        Self::add_finish(self, other.x + other.y, a, b, c, self.z)
    }

    fn add_finish(
        &self,
        other_x_plus_y: C::FieldElement,
        a: C::FieldElement,
        b: C::FieldElement,
        c: C::FieldElement,
        d: C::FieldElement,
    ) -> Self {
        let e = (self.x + self.y) * other_x_plus_y - a - b;
        let f = d - c;
        let g = d + c;
        let h = b - C::EQUATION_A * a;
        Self {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    pub fn sub_mixed(&self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(&other.neg())
    }

    /// Double this point (dbl-2008-hwcd).
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().double();
        let d = C::EQUATION_A * a;
        let e = (self.x + self.y).square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;
        Self {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    /// Returns `[k] self` in constant time.
    pub fn mul(&self, k: &C::Scalar) -> Self {
        scalarmul::mul_fixed_window(self, k)
    }

    /// Returns `[k] self` for a public, possibly unreduced, scalar.
    #[cfg(feature = "alloc")]
    pub fn mul_vartime(&self, k: Vartime<&[Word]>) -> Self {
        scalarmul::mul_wnaf_vartime(self, k, WNAF_WINDOW)
    }
}

impl<C> ConditionallySelectable for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            z: C::FieldElement::conditional_select(&a.z, &b.z, choice),
            t: C::FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }
}

impl<C> ConstantTimeEq for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let xz = self.x * other.z;
        let zx = self.z * other.x;

        let yz = self.y * other.z;
        let zy = self.z * other.y;

        xz.ct_eq(&zx) & yz.ct_eq(&zy)
    }
}

impl<C> Default for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for ExtendedPoint<C> where C: EdwardsParams {}

impl<C> Eq for ExtendedPoint<C> where C: EdwardsParams {}

impl<C> PartialEq for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<AffinePoint<C>> for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        p.to_extended()
    }
}

impl<C> From<&AffinePoint<C>> for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    fn from(p: &AffinePoint<C>) -> Self {
        p.to_extended()
    }
}

impl<C> Group for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    type Scalar = C::Scalar;

    fn random(mut rng: impl RngCore) -> Self {
        Self::generator() * C::Scalar::random(&mut rng)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        ExtendedPoint::generator()
    }

    fn is_identity(&self) -> Choice {
        ExtendedPoint::is_identity(self)
    }

    fn double(&self) -> Self {
        ExtendedPoint::double(self)
    }
}

impl<C> Curve for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    type AffineRepr = AffinePoint<C>;

    fn to_affine(&self) -> AffinePoint<C> {
        ExtendedPoint::to_affine(self)
    }

    /// Normalize every point with a single field inversion.
    #[cfg(feature = "alloc")]
    fn batch_normalize(projective: &[Self], affine: &mut [AffinePoint<C>]) {
        assert_eq!(projective.len(), affine.len());
        let mut zinvs: Vec<_> = projective.iter().map(|p| p.z).collect();
        let mut scratch = vec![C::FieldElement::ONE; zinvs.len()];
        primefield::batch_invert(&mut zinvs, &mut scratch);

        for ((point, zinv), out) in projective.iter().zip(zinvs).zip(affine.iter_mut()) {
            *out = point.to_affine_internal(zinv);
        }
    }
}

impl<C> VartimeGroup for ExtendedPoint<C> where C: EdwardsParams {}

impl<C> Bucket<AffinePoint<C>> for ExtendedPoint<C>
where
    C: EdwardsParams,
{
    type Output = Self;

    fn empty() -> Self {
        Self::IDENTITY
    }

    fn add_assign_point(&mut self, point: &AffinePoint<C>) {
        *self = self.add_mixed(point);
    }

    fn sub_assign_point(&mut self, point: &AffinePoint<C>) {
        *self = self.sub_mixed(point);
    }

    fn add_bucket(&self, rhs: &Self) -> Self {
        ExtendedPoint::add(self, rhs)
    }

    fn double_bucket(&self) -> Self {
        ExtendedPoint::double(self)
    }

    fn to_output(&self) -> Self {
        *self
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<C: EdwardsParams> Add<&ExtendedPoint<C>> for &ExtendedPoint<C> {
    type Output = ExtendedPoint<C>;

    fn add(self, other: &ExtendedPoint<C>) -> ExtendedPoint<C> {
        ExtendedPoint::add(self, other)
    }
}

define_add_variants!(
    LHS = ExtendedPoint<C>,
    RHS = ExtendedPoint<C>,
    Output = ExtendedPoint<C>
);
define_add_assign_variants!(LHS = ExtendedPoint<C>, RHS = ExtendedPoint<C>);

impl<C: EdwardsParams> Add<&AffinePoint<C>> for &ExtendedPoint<C> {
    type Output = ExtendedPoint<C>;

    fn add(self, other: &AffinePoint<C>) -> ExtendedPoint<C> {
        self.add_mixed(other)
    }
}

define_add_variants!(
    LHS = ExtendedPoint<C>,
    RHS = AffinePoint<C>,
    Output = ExtendedPoint<C>
);
define_add_assign_variants!(LHS = ExtendedPoint<C>, RHS = AffinePoint<C>);

impl<C: EdwardsParams> Sub<&ExtendedPoint<C>> for &ExtendedPoint<C> {
    type Output = ExtendedPoint<C>;

    fn sub(self, other: &ExtendedPoint<C>) -> ExtendedPoint<C> {
        ExtendedPoint::sub(self, other)
    }
}

define_sub_variants!(
    LHS = ExtendedPoint<C>,
    RHS = ExtendedPoint<C>,
    Output = ExtendedPoint<C>
);
define_sub_assign_variants!(LHS = ExtendedPoint<C>, RHS = ExtendedPoint<C>);

impl<C: EdwardsParams> Sub<&AffinePoint<C>> for &ExtendedPoint<C> {
    type Output = ExtendedPoint<C>;

    fn sub(self, other: &AffinePoint<C>) -> ExtendedPoint<C> {
        self.sub_mixed(other)
    }
}

define_sub_variants!(
    LHS = ExtendedPoint<C>,
    RHS = AffinePoint<C>,
    Output = ExtendedPoint<C>
);
define_sub_assign_variants!(LHS = ExtendedPoint<C>, RHS = AffinePoint<C>);

impl<C: EdwardsParams> Sum for ExtendedPoint<C> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, p| acc + p)
    }
}

impl<'a, C: EdwardsParams> Sum<&'a ExtendedPoint<C>> for ExtendedPoint<C> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, p| acc + p)
    }
}

// ------------------------------------------------------------------------
// Negation and scalar multiplication
// ------------------------------------------------------------------------

impl<C: EdwardsParams> Neg for ExtendedPoint<C> {
    type Output = Self;

    fn neg(self) -> Self {
        ExtendedPoint::neg(&self)
    }
}

impl<C: EdwardsParams> Neg for &ExtendedPoint<C> {
    type Output = ExtendedPoint<C>;

    fn neg(self) -> ExtendedPoint<C> {
        ExtendedPoint::neg(self)
    }
}

impl<C, S> Mul<S> for ExtendedPoint<C>
where
    C: EdwardsParams,
    S: Borrow<C::Scalar>,
{
    type Output = Self;

    fn mul(self, scalar: S) -> Self {
        ExtendedPoint::mul(&self, scalar.borrow())
    }
}

impl<C, S> Mul<S> for &ExtendedPoint<C>
where
    C: EdwardsParams,
    S: Borrow<C::Scalar>,
{
    type Output = ExtendedPoint<C>;

    fn mul(self, scalar: S) -> ExtendedPoint<C> {
        ExtendedPoint::mul(self, scalar.borrow())
    }
}

impl<C, S> MulAssign<S> for ExtendedPoint<C>
where
    C: EdwardsParams,
    S: Borrow<C::Scalar>,
{
    fn mul_assign(&mut self, scalar: S) {
        *self = ExtendedPoint::mul(self, scalar.borrow());
    }
}
