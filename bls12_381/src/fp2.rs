//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`.

use crate::fp::Fp;
use subtle::Choice;
use towers::{QuadraticExtension, QuadraticFieldParams, QuadraticParams};

/// Parameters of `Fp2`: `u^2 = -1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp2Params;

impl QuadraticParams for Fp2Params {
    type Base = Fp;

    #[inline]
    fn mul_by_nonresidue(x: &Fp) -> Fp {
        -*x
    }

    /// `(-1)^((p^power - 1) / 2) = (-1)^power` since `p = 3 mod 4`.
    #[inline]
    fn frobenius_c1(c1: &Fp, power: usize) -> Fp {
        if power % 2 == 1 { -*c1 } else { *c1 }
    }
}

impl QuadraticFieldParams for Fp2Params {
    // Norm 2, a non-residue in Fp.
    const NON_SQUARE_C0: Fp = Fp::ONE;
    const NON_SQUARE_C1: Fp = Fp::ONE;
}

/// Element `c0 + c1 * u` of the quadratic extension.
pub type Fp2 = QuadraticExtension<Fp2Params>;

/// Multiply by `ξ = u + 1`, the non-residue of the cubic extension.
#[inline]
pub(crate) fn mul_by_xi(x: &Fp2) -> Fp2 {
    Fp2::new(x.c0 - x.c1, x.c0 + x.c1)
}

/// Is `c1` (or, when it is zero, `c0`) greater than `(p - 1) / 2`?
pub(crate) fn lexicographically_largest(x: &Fp2) -> Choice {
    x.c1.lexicographically_largest() | (x.c1.is_zero() & x.c0.lexicographically_largest())
}
