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

mod affine;
mod extended;

pub use crate::{affine::AffinePoint, extended::ExtendedPoint};
pub use ff::{self, Field, PrimeField};
pub use group;
pub use primefield::CanonicalLimbs;
pub use scalarmul;

use core::fmt::Debug;

/// Parameters of a twisted Edwards curve `a*x^2 + y^2 = 1 + d*x^2*y^2`.
pub trait EdwardsParams: Copy + Debug + Default + Eq + Send + Sync + 'static {
    /// Base field element type.
    type FieldElement: Field;

    /// Scalar field of the prime order subgroup.
    type Scalar: PrimeField + CanonicalLimbs;

    /// Coefficient `a` in the curve equation.
    const EQUATION_A: Self::FieldElement;

    /// Coefficient `d` in the curve equation.
    const EQUATION_D: Self::FieldElement;

    /// Generator of the prime order subgroup in affine coordinates: (x, y).
    const GENERATOR: (Self::FieldElement, Self::FieldElement);
}
