#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

mod cubic;
mod quadratic;
mod tower;

pub use crate::{
    cubic::{CubicExtension, CubicParams},
    quadratic::{QuadraticExtension, QuadraticFieldParams, QuadraticParams},
    tower::TowerField,
};
pub use primefield;
