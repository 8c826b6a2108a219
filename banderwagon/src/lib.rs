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
//! use banderwagon::{Element, Fr};
//!
//! let p = Element::generator() * Fr::from(42u64);
//! let bytes = p.to_bytes();
//! assert_eq!(Element::from_bytes(&bytes), Ok(p));
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

mod element;
mod error;
mod params;

pub use crate::{
    element::Element,
    error::{Error, Result},
    params::{BandersnatchParams, Fq, Fr, FrParams},
};
pub use edwards;
pub use ff;
pub use group;

/// Bandersnatch point in extended coordinates.
pub type ExtendedPoint = edwards::ExtendedPoint<BandersnatchParams>;

/// Bandersnatch point in affine coordinates.
pub type AffinePoint = edwards::AffinePoint<BandersnatchParams>;
