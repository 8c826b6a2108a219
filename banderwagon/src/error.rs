//! Error type

use core::fmt::{self, Display};

/// Result type with the `banderwagon` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised when decoding elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input is not 32 bytes long.
    InvalidEncoding,

    /// The serialized coordinate is not reduced modulo `q`.
    CoordinateGreaterThanOrEqualModulus,

    /// No point of the curve has the serialized x-coordinate.
    PointNotOnCurve,

    /// The point is on the curve but outside the order `2r` subgroup.
    PointNotInSubgroup,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidEncoding => "invalid encoding",
            Error::CoordinateGreaterThanOrEqualModulus => "coordinate is not reduced",
            Error::PointNotOnCurve => "point is not on the curve",
            Error::PointNotInSubgroup => "point is not in the banderwagon subgroup",
        })
    }
}

impl core::error::Error for Error {}
