//! Error type

use core::fmt::{self, Display};

/// Result type with the `bls12_381` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised when decoding or generating values at the boundary of the crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed length or flag bits.
    InvalidEncoding,

    /// A serialized coordinate is not reduced modulo `p`.
    CoordinateGreaterThanOrEqualModulus,

    /// The coordinates do not satisfy the curve equation.
    PointNotOnCurve,

    /// The point is on the curve but outside the prime order subgroup.
    PointNotInSubgroup,

    /// The point at infinity where a finite point is required.
    PointAtInfinity,

    /// A zero scalar where a non-zero one is required.
    ScalarZero,

    /// A serialized scalar is not reduced modulo `r`.
    ScalarLargerThanCurveOrder,

    /// The random number generator failed.
    RandomnessFailure,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidEncoding => "invalid encoding",
            Error::CoordinateGreaterThanOrEqualModulus => "coordinate is not reduced",
            Error::PointNotOnCurve => "point is not on the curve",
            Error::PointNotInSubgroup => "point is not in the prime order subgroup",
            Error::PointAtInfinity => "point at infinity",
            Error::ScalarZero => "scalar is zero",
            Error::ScalarLargerThanCurveOrder => "scalar is not reduced",
            Error::RandomnessFailure => "random number generator failure",
        })
    }
}

impl core::error::Error for Error {}
