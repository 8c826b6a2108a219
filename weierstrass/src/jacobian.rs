//! Jacobian curve points: `(x, y) = (X/Z^2, Y/Z^3)`.

#![allow(clippy::op_ref)]

use crate::{AffinePoint, CurveParams, ProjectivePoint, point_arithmetic::PointArithmetic};
use ff::Field;
use group::{Curve, Group};
use rand_core::RngCore;
use scalarmul::VartimeGroup;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

#[cfg(feature = "alloc")]
use {
    crate::projective::WNAF_WINDOW,
    alloc::{vec, vec::Vec},
    scalarmul::{Vartime, Word},
};

/// Point on a Weierstrass curve in Jacobian coordinates.
///
/// The formulas are the incomplete ones from the Explicit-Formulas Database. The constant-time
/// [`JacobianPoint::add`] evaluates both the addition and the doubling formula and selects the
/// correct result; the `_vartime` methods branch on the exceptional cases instead.
#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint<C: CurveParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) z: C::FieldElement,
}

impl<C> JacobianPoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: C::FieldElement::ONE,
        y: C::FieldElement::ONE,
        z: C::FieldElement::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: C::FieldElement::ONE,
    };

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint<C> {
        self.to_affine_internal(self.z.invert().unwrap_or(C::FieldElement::ZERO))
    }

    fn to_affine_internal(self, zinv: C::FieldElement) -> AffinePoint<C> {
        let zinv2 = zinv.square();
        let affine = AffinePoint {
            x: self.x * zinv2,
            y: self.y * zinv2 * zinv,
            infinity: 0,
        };
        AffinePoint::conditional_select(&affine, &AffinePoint::IDENTITY, self.z.is_zero())
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Does `Y^2 = X^3 + a X Z^4 + b Z^6` hold? The identity does.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4 * z2;
        let rhs = (self.x.square() + C::EQUATION_A * z4) * self.x + C::EQUATION_B * z6;
        self.y.square().ct_eq(&rhs) | self.is_identity()
    }

    /// The same point with coordinates scaled as `(l^2 X, l^3 Y, l Z)`.
    pub fn rescale(&self, lambda: &C::FieldElement) -> Self {
        let l2 = lambda.square();
        Self {
            x: self.x * l2,
            y: self.y * l2 * lambda,
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

    /// dbl-2007-bl. The identity and 2-torsion points map to `Z3 = 0`.
    pub fn double(&self) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let s = ((self.x + yy).square() - xx - yyyy).double();
        let m = xx.double() + xx + C::PointArithmetic::mul_by_a(&zz.square());
        let t = m.square() - s.double();

        Self {
            x: t,
            y: m * (s - t) - yyyy.double().double().double(),
            z: (self.y + self.z).square() - yy - zz,
        }
    }

    /// add-2007-bl, returning the sum together with `H = U2 - U1` and `r = 2 (S2 - S1)`.
    ///
    /// Only meaningful when neither input is the identity; `H = 0` means equal x-coordinates.
    fn add_formula(&self, other: &Self) -> (Self, C::FieldElement, C::FieldElement) {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - u1;
        let r = (s2 - s1).double();
        let i = h.double().square();
        let j = h * i;
        let v = u1 * i;
        let x3 = r.square() - j - v.double();

        let sum = Self {
            x: x3,
            y: r * (v - x3) - (s1 * j).double(),
            z: ((self.z + other.z).square() - z1z1 - z2z2) * h,
        };
        (sum, h, r)
    }

    /// madd-2007-bl for an affine right-hand side; same contract as `add_formula`.
    fn add_mixed_formula(&self, other: &AffinePoint<C>) -> (Self, C::FieldElement, C::FieldElement) {
        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;
        let x3 = r.square() - j - v.double();

        let sum = Self {
            x: x3,
            y: r * (v - x3) - (self.y * j).double(),
            z: (self.z + h).square() - z1z1 - hh,
        };
        (sum, h, r)
    }

    /// Returns `self + other` in constant time.
    pub fn add(&self, other: &Self) -> Self {
        let (sum, h, r) = self.add_formula(other);
        let mut ret = Self::conditional_select(&sum, &self.double(), h.is_zero() & r.is_zero());
        ret.conditional_assign(other, self.is_identity());
        ret.conditional_assign(self, other.is_identity());
        ret
    }

    /// Returns `self + other` in constant time.
    pub fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        let (sum, h, r) = self.add_mixed_formula(other);
        let mut ret = Self::conditional_select(&sum, &self.double(), h.is_zero() & r.is_zero());
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

        let (sum, h, r) = self.add_formula(other);
        match (h.is_zero_vartime(), r.is_zero_vartime()) {
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

        let (sum, h, r) = self.add_mixed_formula(other);
        match (h.is_zero_vartime(), r.is_zero_vartime()) {
            (true, true) => self.double(),
            (true, false) => Self::IDENTITY,
            _ => sum,
        }
    }

    fn is_identity_vartime(&self) -> bool {
        self.z.is_zero_vartime()
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

impl<C> ConditionallySelectable for JacobianPoint<C>
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

impl<C> ConstantTimeEq for JacobianPoint<C>
where
    C: CurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * z2z2 * other.z).ct_eq(&(other.y * z1z1 * self.z));
        let self_id = self.is_identity();
        let other_id = other.is_identity();

        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl<C> Default for JacobianPoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> DefaultIsZeroes for JacobianPoint<C> where C: CurveParams {}

impl<C> Eq for JacobianPoint<C> where C: CurveParams {}

impl<C> PartialEq for JacobianPoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> From<AffinePoint<C>> for JacobianPoint<C>
where
    C: CurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        let jacobian = JacobianPoint {
            x: p.x,
            y: p.y,
            z: C::FieldElement::ONE,
        };
        Self::conditional_select(&jacobian, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<&AffinePoint<C>> for JacobianPoint<C>
where
    C: CurveParams,
{
    fn from(p: &AffinePoint<C>) -> Self {
        Self::from(*p)
    }
}

impl<C> From<ProjectivePoint<C>> for JacobianPoint<C>
where
    C: CurveParams,
{
    /// `(X/Z, Y/Z) = (XZ, YZ^2, Z)`
    fn from(p: ProjectivePoint<C>) -> Self {
        let jacobian = JacobianPoint {
            x: p.x * p.z,
            y: p.y * p.z.square(),
            z: p.z,
        };
        Self::conditional_select(&jacobian, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> Group for JacobianPoint<C>
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
        JacobianPoint::is_identity(self)
    }

    fn double(&self) -> Self {
        JacobianPoint::double(self)
    }
}

impl<C> Curve for JacobianPoint<C>
where
    C: CurveParams,
{
    type AffineRepr = AffinePoint<C>;

    fn to_affine(&self) -> AffinePoint<C> {
        JacobianPoint::to_affine(self)
    }

    /// Normalize every point with a single field inversion.
    #[cfg(feature = "alloc")]
    fn batch_normalize(jacobian: &[Self], affine: &mut [AffinePoint<C>]) {
        assert_eq!(jacobian.len(), affine.len());
        let mut zinvs: Vec<_> = jacobian.iter().map(|p| p.z).collect();
        let mut scratch = vec![C::FieldElement::ONE; zinvs.len()];
        primefield::batch_invert(&mut zinvs, &mut scratch);

        for ((point, zinv), out) in jacobian.iter().zip(zinvs).zip(affine.iter_mut()) {
            *out = point.to_affine_internal(zinv);
        }
    }
}

impl<C> VartimeGroup for JacobianPoint<C>
where
    C: CurveParams,
{
    fn add_vartime(&self, rhs: &Self) -> Self {
        JacobianPoint::add_vartime(self, rhs)
    }

    fn double_vartime(&self) -> Self {
        JacobianPoint::double(self)
    }

    fn is_identity_vartime(&self) -> bool {
        JacobianPoint::is_identity_vartime(self)
    }
}

impl_point_ops!(JacobianPoint);
