#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

pub mod limb;
pub mod modular;
mod uint;
mod vartime;

pub use crate::{
    limb::{WideWord, Word},
    modular::MontyParams,
    uint::Uint,
    vartime::Vartime,
};
pub use subtle;
pub use zeroize;

/// 64-bit unsigned integer.
pub type U64 = Uint<1>;
/// 128-bit unsigned integer.
pub type U128 = Uint<2>;
/// 192-bit unsigned integer.
pub type U192 = Uint<3>;
/// 256-bit unsigned integer.
pub type U256 = Uint<4>;
/// 320-bit unsigned integer.
pub type U320 = Uint<5>;
/// 384-bit unsigned integer.
pub type U384 = Uint<6>;
/// 448-bit unsigned integer.
pub type U448 = Uint<7>;
/// 512-bit unsigned integer.
pub type U512 = Uint<8>;
/// 768-bit unsigned integer.
pub type U768 = Uint<12>;
