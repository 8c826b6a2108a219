//! Extended Jacobian (XYZZ) curve points: `(x, y) = (X/ZZ, Y/ZZZ)` with `ZZ^3 = ZZZ^2`.
//!
//! Mixed addition costs 8M + 2S, which makes this the representation of choice for the buckets
//! of a multi-scalar multiplication.

#![allow(clippy::op_ref)]

use crate::{AffinePoint, CurveParams, ProjectivePoint, point_arithmetic::PointArithmetic};
use ff::Field;
use group::{Curve, Group};
use rand_core::RngCore;
use scalarmul::{Bucket, VartimeGroup};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

#[cfg(feature = "alloc")]
use {
    crate::projective::WNAF_WINDOW,
    alloc::{vec, vec::Vec},
    scalarmul::{Vartime, Word},
};

/// Point on a Weierstrass curve in extended Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedJacobianPoint<C: CurveParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) zz: C::FieldElement,
    pub(crate) zzz: C::FieldElement,
}

impl<C> ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ONE,
        y: C::FieldElement::ONE,
        zz: C::FieldElement::ZERO,
        zzz: C::FieldElement::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        zz: C::FieldElement::ONE,
        zzz: C::FieldElement::ONE,
    };

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint<C> {
        self.to_affine_internal((self.zz * self.zzz).invert().unwrap_or(C::FieldElement::ZERO))
    }

    /// Affine coordinates given `inv = 1/(ZZ ZZZ)`.
    fn to_affine_internal(self, inv: C::FieldElement) -> AffinePoint<C> {
        let affine = AffinePoint {
            x: self.x * self.zzz * inv,
            y: self.y * self.zz * inv,
            infinity: 0,
        };
        AffinePoint::conditional_select(&affine, &AffinePoint::IDENTITY, self.is_identity())
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.zz.is_zero()
    }

    /// Does `Y^2 = X^3 + a X ZZ^2 + b ZZ^3` hold with `ZZ^3 = ZZZ^2`? The identity does.
    pub fn is_on_curve(&self) -> Choice {
        let zz2 = self.zz.square();
        let zz3 = zz2 * self.zz;
        let rhs = (self.x.square() + C::EQUATION_A * zz2) * self.x + C::EQUATION_B * zz3;
        (self.y.square().ct_eq(&rhs) & zz3.ct_eq(&self.zzz.square())) | self.is_identity()
    }

    /// The same point with coordinates scaled as `(l^2 X, l^3 Y, l^2 ZZ, l^3 ZZZ)`.
    pub fn rescale(&self, lambda: &C::FieldElement) -> Self {
        let l2 = lambda.square();
        let l3 = l2 * lambda;
        Self {
            x: self.x * l2,
            y: self.y * l3,
            zz: self.zz * l2,
            zzz: self.zzz * l3,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            zz: self.zz,
            zzz: self.zzz,
        }
    }

    /// dbl-2008-s-1. The identity and 2-torsion points map to `ZZ3 = 0`.
    pub fn double(&self) -> Self {
        let u = self.y.double();
        let v = u.square();
        let w = u * v;
        let s = self.x * v;
        let xx = self.x.square();
        let m = xx.double() + xx + C::PointArithmetic::mul_by_a(&self.zz.square());
        let x3 = m.square() - s.double();

        Self {
            x: x3,
            y: m * (s - x3) - w * self.y,
            zz: v * self.zz,
            zzz: w * self.zzz,
        }
    }

    /// mdbl-2008-s-1: double an affine point.
    fn double_affine(p: &AffinePoint<C>) -> Self {
        let u = p.y.double();
        let v = u.square();
        let w = u * v;
        let s = p.x * v;
        let xx = p.x.square();
        let m = xx.double() + xx + C::EQUATION_A;
        let x3 = m.square() - s.double();

        let double = Self {
            x: x3,
            y: m * (s - x3) - w * p.y,
            zz: v,
            zzz: w,
        };
        Self::conditional_select(&double, &Self::IDENTITY, p.is_identity())
    }

    /// add-2008-s, returning the sum together with `P = U2 - U1` and `R = S2 - S1`.
    fn add_formula(&self, other: &Self) -> (Self, C::FieldElement, C::FieldElement) {
        let u1 = self.x * other.zz;
        let u2 = other.x * self.zz;
        let s1 = self.y * other.zzz;
        let s2 = other.y * self.zzz;
        let p = u2 - u1;
        let r = s2 - s1;
        let pp = p.square();
        let ppp = p * pp;
        let q = u1 * pp;
        let x3 = r.square() - ppp - q.double();

        let sum = Self {
            x: x3,
            y: r * (q - x3) - s1 * ppp,
            zz: self.zz * other.zz * pp,
            zzz: self.zzz * other.zzz * ppp,
        };
        (sum, p, r)
    }

    /// madd-2008-s; same contract as `add_formula`.
    fn add_mixed_formula(&self, other: &AffinePoint<C>) -> (Self, C::FieldElement, C::FieldElement) {
        let u2 = other.x * self.zz;
        let s2 = other.y * self.zzz;
        let p = u2 - self.x;
        let r = s2 - self.y;
        let pp = p.square();
        let ppp = p * pp;
        let q = self.x * pp;
        let x3 = r.square() - ppp - q.double();

        let sum = Self {
            x: x3,
            y: r * (q - x3) - self.y * ppp,
            zz: self.zz * pp,
            zzz: self.zzz * ppp,
        };
        (sum, p, r)
    }

    /// Returns `self + other` in constant time.
    pub fn add(&self, other: &Self) -> Self {
        let (sum, p, r) = self.add_formula(other);
        let mut ret = Self::conditional_select(&sum, &self.double(), p.is_zero() & r.is_zero());
        ret.conditional_assign(other, self.is_identity());
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Returns `self + other` in constant time.
    pub fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        let (sum, p, r) = self.add_mixed_formula(other);
        let mut ret = Self::conditional_select(&sum, &self.double(), p.is_zero() & r.is_zero());
        ret.conditional_assign(&Self::from(other), self.is_identity());
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`.
    pub fn sub_mixed(&self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(&-other)
    }

    /// Returns `self + other`, branching on the exceptional cases.
    pub fn add_vartime(&self, other: &Self) -> Self {
        if self.is_identity_vartime() {
            return *other;
        }
        if other.is_identity_vartime() {
            return *self;
        }

        let (sum, p, r) = self.add_formula(other);
        match (p.is_zero_vartime(), r.is_zero_vartime()) {
            (true, true) => self.double(),
            (true, false) => Self::IDENTITY,
            _ => sum,
        }
    }

    /// Returns `self + other`, branching on the exceptional cases.
    pub fn add_mixed_vartime(&self, other: &AffinePoint<C>) -> Self {
        if bool::from(other.is_identity()) {
            return *self;
        }
        if self.is_identity_vartime() {
            return Self::from(other);
        }

        let (sum, p, r) = self.add_mixed_formula(other);
        match (p.is_zero_vartime(), r.is_zero_vartime()) {
            (true, true) => Self::double_affine(other),
            (true, false) => Self::IDENTITY,
            _ => sum,
        }
    }

    fn is_identity_vartime(&self) -> bool {
        self.zz.is_zero_vartime()
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

impl<C> ConditionallySelectable for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            zz: C::FieldElement::conditional_select(&a.zz, &b.zz, choice),
            zzz: C::FieldElement::conditional_select(&a.zzz, &b.zzz, choice),
        }
    }
}

impl<C> ConstantTimeEq for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let x_eq = (self.x * other.zz).ct_eq(&(other.x * self.zz));
        let y_eq = (self.y * other.zzz).ct_eq(&(other.y * self.zzz));
        let self_id = self.is_identity();
        let other_id = other.is_identity();

        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl<C> Default for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for ExtendedJacobianPoint<C> where C: CurveParams {}

impl<C> Eq for ExtendedJacobianPoint<C> where C: CurveParams {}

impl<C> PartialEq for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<AffinePoint<C>> for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        let xyzz = ExtendedJacobianPoint {
            x: p.x,
            y: p.y,
            zz: C::FieldElement::ONE,
            zzz: C::FieldElement::ONE,
        };
        Self::conditional_select(&xyzz, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<&AffinePoint<C>> for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn from(p: &AffinePoint<C>) -> Self {
        Self::from(*p)
    }
}

impl<C> From<ProjectivePoint<C>> for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    /// `(X/Z, Y/Z) = (XZ, YZ^2, Z^2, Z^3)`
    fn from(p: ProjectivePoint<C>) -> Self {
        let zz = p.z.square();
        let xyzz = ExtendedJacobianPoint {
            x: p.x * p.z,
            y: p.y * zz,
            zz,
            zzz: zz * p.z,
        };
        Self::conditional_select(&xyzz, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> Group for ExtendedJacobianPoint<C>
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
        ExtendedJacobianPoint::is_identity(self)
    }

    fn double(&self) -> Self {
        ExtendedJacobianPoint::double(self)
    }
}

impl<C> Curve for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    type AffineRepr = AffinePoint<C>;

    fn to_affine(&self) -> AffinePoint<C> {
        ExtendedJacobianPoint::to_affine(self)
    }

    /// Normalize every point with a single field inversion.
    #[cfg(feature = "alloc")]
    fn batch_normalize(points: &[Self], affine: &mut [AffinePoint<C>]) {
        assert_eq!(points.len(), affine.len());
        let mut invs: Vec<_> = points.iter().map(|p| p.zz * p.zzz).collect();
        let mut scratch = vec![C::FieldElement::ONE; invs.len()];
        primefield::batch_invert(&mut invs, &mut scratch);

        for ((point, inv), out) in points.iter().zip(invs).zip(affine.iter_mut()) {
            *out = point.to_affine_internal(inv);
        }
    }
}

impl<C> VartimeGroup for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    fn add_vartime(&self, rhs: &Self) -> Self {
        ExtendedJacobianPoint::add_vartime(self, rhs)
    }

    fn double_vartime(&self) -> Self {
        ExtendedJacobianPoint::double(self)
    }

    fn is_identity_vartime(&self) -> bool {
        ExtendedJacobianPoint::is_identity_vartime(self)
    }
}

/// Buckets accumulate affine inputs with the cheap mixed formulas and hand the result back in
/// projective coordinates.
impl<C> Bucket<AffinePoint<C>> for ExtendedJacobianPoint<C>
where
    C: CurveParams,
{
    type Output = ProjectivePoint<C>;

    fn empty() -> Self {
        Self::IDENTITY
    }

    fn add_assign_point(&mut self, point: &AffinePoint<C>) {
        *self = self.add_mixed_vartime(point);
    }

    fn sub_assign_point(&mut self, point: &AffinePoint<C>) {
        *self = self.add_mixed_vartime(&-point);
    }

    fn add_bucket(&self, rhs: &Self) -> Self {
        self.add_vartime(rhs)
    }

    fn double_bucket(&self) -> Self {
        ExtendedJacobianPoint::double(self)
    }

    fn to_output(&self) -> ProjectivePoint<C> {
        ProjectivePoint::from(*self)
    }
}

impl_point_ops!(ExtendedJacobianPoint);
