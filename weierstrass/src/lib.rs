#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod macros;

pub mod point_arithmetic;

mod affine;
mod dev;
mod jacobian;
mod projective;
mod xyzz;

pub use crate::{
    affine::AffinePoint, jacobian::JacobianPoint, projective::ProjectivePoint,
    xyzz::ExtendedJacobianPoint,
};
pub use ff::{self, Field, PrimeField};
pub use group;
pub use primefield::CanonicalLimbs;
pub use scalarmul;

use core::fmt::Debug;

/// Parameters of an elliptic curve described by the short Weierstrass equation
/// `y^2 = x^3 + a*x + b`.
pub trait CurveParams: Copy + Debug + Default + Eq + Send + Sync + 'static {
    /// Base field element type.
    type FieldElement: Field;

    /// Scalar field of the prime order (sub)group.
    type Scalar: PrimeField + CanonicalLimbs;

    /// Formulas specialized for the `a`-coefficient.
    type PointArithmetic: point_arithmetic::PointArithmetic<Self>;

    /// Coefficient `a` in the curve equation.
    const EQUATION_A: Self::FieldElement;

    /// Coefficient `b` in the curve equation.
    const EQUATION_B: Self::FieldElement;

    /// Generator point's affine coordinates: (x, y).
    const GENERATOR: (Self::FieldElement, Self::FieldElement);
}

/// `3 * b`, the constant used by every doubling and complete addition formula.
#[inline(always)]
pub(crate) fn b3<C: CurveParams>() -> C::FieldElement {
    C::EQUATION_B.double() + C::EQUATION_B
}
