#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

//! ## Usage
//!
//! ```
//! use bls12_381::{Fr, G1Affine, G1Projective, G2Affine, G2Projective, pairing};
//!
//! let a = Fr::from(5u64);
//! let b = Fr::from(7u64);
//! let p = (G1Projective::GENERATOR * a).to_affine();
//! let q = (G2Projective::GENERATOR * b).to_affine();
//!
//! let lhs = pairing(&p, &q);
//! let rhs = pairing(&G1Affine::GENERATOR, &G2Affine::GENERATOR) * (a * b);
//! assert_eq!(lhs, rhs);
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod hash_to_curve;
pub mod hash_to_field;

mod encoding;
mod error;
mod fp;
mod fp12;
mod fp2;
mod fp6;
mod g1;
mod g2;
mod scalar;
mod subgroup;

#[cfg(feature = "alloc")]
mod pairings;

pub use crate::{
    encoding::PointEncoding,
    error::{Error, Result},
    fp::{Fp, FpParams},
    fp2::{Fp2, Fp2Params},
    fp6::{Fp6, Fp6Params},
    fp12::{Fp12, Fp12Params},
    g1::{G1Affine, G1ExtendedJacobian, G1Jacobian, G1Params, G1Projective, Glv},
    g2::{G2Affine, G2ExtendedJacobian, G2Jacobian, G2Params, G2Projective, Gls},
    hash_to_curve::HashToCurve,
    scalar::{Fr, FrParams, ScalarExt},
    subgroup::Subgroup,
};
pub use ff;
pub use group;
pub use scalarmul;
pub use weierstrass;

#[cfg(feature = "alloc")]
pub use crate::pairings::{
    G2Prepared, Gt, MillerLoopResult, miller_loop, multi_miller_loop, pairing,
};

/// `|z|`, the absolute value of the BLS parameter which generates the curve.
pub const BLS_X: u64 = 0xd201_0000_0001_0000;

/// The BLS parameter `z` is negative.
pub const BLS_X_IS_NEGATIVE: bool = true;
