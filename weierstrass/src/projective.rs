//! Projective curve points.

#![allow(clippy::op_ref)]

use crate::{
    AffinePoint, CurveParams, ExtendedJacobianPoint, JacobianPoint,
    point_arithmetic::PointArithmetic,
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

/// Window width used by [`ProjectivePoint::mul_vartime`].
#[cfg(feature = "alloc")]
pub(crate) const WNAF_WINDOW: usize = 5;

/// Point on a Weierstrass curve in projective coordinates.
///
/// Addition and doubling use the complete formulas of Renes, Costello and Batina, so every
/// operation is constant time and correct for all inputs, including the identity.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<C: CurveParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) z: C::FieldElement,
}

impl<C> ProjectivePoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ZERO,
        y: C::FieldElement::ONE,
        z: C::FieldElement::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: C::FieldElement::ONE,
    };

    /// Create a point from coordinates `(X : Y : Z)` without checking the curve equation.
    ///
    /// Used by curve crates to apply endomorphisms which act coordinate-wise.
    pub const fn new_unchecked(x: C::FieldElement, y: C::FieldElement, z: C::FieldElement) -> Self {
        Self { x, y, z }
    }

    /// Projective coordinates `(X, Y, Z)` of this representative.
    pub fn to_coordinates(&self) -> (C::FieldElement, C::FieldElement, C::FieldElement) {
        (self.x, self.y, self.z)
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint<C> {
        self.to_affine_internal(self.z.invert().unwrap_or(C::FieldElement::ZERO))
    }

    /// Affine coordinates given `zinv = 1/z`; the identity for `z = 0`.
    pub(crate) fn to_affine_internal(self, zinv: C::FieldElement) -> AffinePoint<C> {
        let affine = AffinePoint {
            x: self.x * zinv,
            y: self.y * zinv,
            infinity: 0,
        };
        AffinePoint::conditional_select(&affine, &AffinePoint::IDENTITY, self.z.is_zero())
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Does `Y^2 Z = X^3 + a X Z^2 + b Z^3` hold for a non-zero representative?
    pub fn is_on_curve(&self) -> Choice {
        let zz = self.z.square();
        let lhs = self.y.square() * self.z;
        let rhs = (self.x.square() + C::EQUATION_A * zz) * self.x + C::EQUATION_B * zz * self.z;
        lhs.ct_eq(&rhs) & !(self.y.is_zero() & self.z.is_zero())
    }

    /// The same point with coordinates scaled by a non-zero `lambda`.
    pub fn rescale(&self, lambda: &C::FieldElement) -> Self {
        Self {
            x: self.x * lambda,
            y: self.y * lambda,
            z: self.z * lambda,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        C::PointArithmetic::add(self, other)
    }

    /// Returns `self + other`.
    pub fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        C::PointArithmetic::add_mixed(self, other)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    pub fn sub_mixed(&self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(&-other)
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        C::PointArithmetic::double(self)
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

impl<C> ConditionallySelectable for ProjectivePoint<C>
where
    C: CurveParams,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            z: C::FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C> ConstantTimeEq for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let x_eq = (self.x * other.z).ct_eq(&(other.x * self.z));
        let y_eq = (self.y * other.z).ct_eq(&(other.y * self.z));
        let self_id = self.is_identity();
        let other_id = other.is_identity();

        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl<C> Default for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for ProjectivePoint<C> where C: CurveParams {}

impl<C> Eq for ProjectivePoint<C> where C: CurveParams {}

impl<C> PartialEq for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<AffinePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        let projective = ProjectivePoint {
            x: p.x,
            y: p.y,
            z: C::FieldElement::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<&AffinePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn from(p: &AffinePoint<C>) -> Self {
        Self::from(*p)
    }
}

impl<C> From<JacobianPoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    /// `(X/Z^2, Y/Z^3) = (XZ : Y : Z^3)`
    fn from(p: JacobianPoint<C>) -> Self {
        let projective = ProjectivePoint {
            x: p.x * p.z,
            y: p.y,
            z: p.z.square() * p.z,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<ExtendedJacobianPoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    /// `(X/ZZ, Y/ZZZ) = (X ZZZ : Y ZZ : ZZ ZZZ)`
    fn from(p: ExtendedJacobianPoint<C>) -> Self {
        let projective = ProjectivePoint {
            x: p.x * p.zzz,
            y: p.y * p.zz,
            z: p.zz * p.zzz,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> Group for ProjectivePoint<C>
where
    C: CurveParams,
{
    type Scalar = C::Scalar;

    fn random(mut rng: impl RngCore) -> Self {
        Self::GENERATOR * C::Scalar::random(&mut rng)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        Self::GENERATOR
    }

    fn is_identity(&self) -> Choice {
        ProjectivePoint::is_identity(self)
    }

    fn double(&self) -> Self {
        ProjectivePoint::double(self)
    }
}

impl<C> Curve for ProjectivePoint<C>
where
    C: CurveParams,
{
    type AffineRepr = AffinePoint<C>;

    fn to_affine(&self) -> AffinePoint<C> {
        ProjectivePoint::to_affine(self)
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

impl<C> VartimeGroup for ProjectivePoint<C> where C: CurveParams {}

impl<C> Bucket<AffinePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
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
        ProjectivePoint::add(self, rhs)
    }

    fn double_bucket(&self) -> Self {
        ProjectivePoint::double(self)
    }

    fn to_output(&self) -> Self {
        *self
    }
}

impl_point_ops!(ProjectivePoint);
