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

pub mod mul;
#[cfg(feature = "alloc")]
pub mod msm;
#[cfg(feature = "alloc")]
pub mod recode;

mod lookup_table;
mod traits;

pub use crate::{
    lookup_table::LookupTable,
    mul::{mul_double_and_add, mul_double_and_add_vartime, mul_fixed_window},
    traits::{Bucket, VartimeGroup},
};
pub use bigint::{Vartime, Word};

#[cfg(feature = "alloc")]
pub use crate::{
    msm::{best_window, msm_naive_vartime, msm_unsigned_vartime, msm_vartime},
    mul::{mul_multi_wnaf_vartime, mul_naf_vartime, mul_wnaf_vartime},
    recode::{naf, signed_window_digits, wnaf},
};

#[cfg(feature = "parallel")]
pub use crate::msm::msm_parallel_vartime;
