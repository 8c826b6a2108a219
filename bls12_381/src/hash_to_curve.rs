//! Hashing to G1 and G2 per [RFC 9380][h2c], suites `BLS12381G1_XMD:SHA-256_SSWU_*` and
//! `BLS12381G2_XMD:SHA-256_SSWU_*` (any `digest` hash may be plugged in).
//!
//! Field elements from [`hash_to_field`] go through the simplified SWU map onto a curve
//! isogenous to `E`, then through the isogeny onto `E` itself, and finally the cofactor is
//! cleared with [`Subgroup::clear_cofactor`].
//!
//! [h2c]: https://www.rfc-editor.org/rfc/rfc9380.html

mod g1;
mod g2;

use crate::{
    hash_to_field::{ExpandMsgXmdError, FromOkm, hash_to_field},
    subgroup::Subgroup,
};
use digest::{Digest, core_api::BlockSizeUser};
use ff::Field;
use group::Group;
use subtle::Choice;

/// The `sgn0` function of [RFC 9380 section 4.1][sgn0].
///
/// [sgn0]: https://www.rfc-editor.org/rfc/rfc9380.html#name-the-sgn0-function
pub trait Sgn0 {
    /// Returns `1` if the element is "negative".
    fn sgn0(&self) -> Choice;
}

/// Curve and map constants of the simplified SWU map onto `E': y^2 = x^3 + A' * x + B'`.
#[derive(Debug)]
pub struct OsswuMapParams<F> {
    /// `A'`
    pub map_a: F,
    /// `B'`
    pub map_b: F,
    /// The non-square `Z`.
    pub z: F,
    /// `-B' / A'`
    pub minus_b_over_a: F,
    /// `B' / (Z * A')`, the `x` coordinate used when `Z^2 u^4 + Z u^2 = 0`.
    pub b_over_za: F,
}

/// Simplified Shallue-van de Woestijne-Ulas map for `A' * B' != 0`.
pub trait OsswuMap: Field + Sgn0 {
    /// Constants of the isogenous curve.
    const PARAMS: OsswuMapParams<Self>;

    /// Map `u` to affine coordinates on `E'`, with `sgn0(y) == sgn0(u)`.
    fn osswu(&self) -> (Self, Self) {
        let params = &Self::PARAMS;
        let curve = |x: &Self| (x.square() + params.map_a) * x + params.map_b;

        let zu2 = params.z * self.square();
        let tv1 = (zu2.square() + zu2).invert();
        let x1 = Self::conditional_select(
            &params.b_over_za,
            &(params.minus_b_over_a * (Self::ONE + tv1.unwrap_or(Self::ZERO))),
            tv1.is_some(),
        );
        let x2 = zu2 * x1;

        // One of gx1 and gx2 = Z u^2 gx1 is square.
        let y1 = curve(&x1).sqrt();
        let y2 = curve(&x2).sqrt().unwrap_or(Self::ZERO);
        let is_gx1_square = y1.is_some();

        let x = Self::conditional_select(&x2, &x1, is_gx1_square);
        let mut y = Self::conditional_select(&y2, &y1.unwrap_or(Self::ZERO), is_gx1_square);
        y.conditional_assign(&-y, self.sgn0() ^ y.sgn0());
        (x, y)
    }
}

/// Rational maps `x = x_num(x') / x_den(x')` and `y = y' * y_num(x') / y_den(x')`, with
/// coefficients from the constant term up.
#[derive(Debug)]
pub struct IsogenyCoefficients<F: 'static> {
    /// `x_num`
    pub xnum: &'static [F],
    /// `x_den`
    pub xden: &'static [F],
    /// `y_num`
    pub ynum: &'static [F],
    /// `y_den`
    pub yden: &'static [F],
}

/// Isogeny from `E'` to the target curve.
pub trait Isogeny: Field {
    /// Coefficients of the rational maps.
    const COEFFICIENTS: IsogenyCoefficients<Self>;

    /// Image of the affine point `(x, y)` of `E'` as projective coordinates `(X : Y : Z)`.
    ///
    /// `Z` is zero when `(x, y)` lies in the kernel.
    fn isogeny(x: &Self, y: &Self) -> (Self, Self, Self) {
        let c = &Self::COEFFICIENTS;
        let xn = horner(c.xnum, x);
        let xd = horner(c.xden, x);
        let yn = horner(c.ynum, x);
        let yd = horner(c.yden, x);
        (xn * yd, *y * yn * xd, xd * yd)
    }
}

fn horner<F: Field>(coefficients: &[F], x: &F) -> F {
    coefficients
        .iter()
        .rev()
        .fold(F::ZERO, |acc, c| acc * x + c)
}

/// Map a field element to a point of the curve, not yet in the prime order subgroup.
pub trait MapToCurve {
    /// Curve point type.
    type Output;

    /// The `map_to_curve` step of RFC 9380.
    fn map_to_curve(&self) -> Self::Output;
}

/// Hash byte strings to a group of prime order `r`.
pub trait HashToCurve: Group + Subgroup {
    /// Field the points are defined over.
    type FieldElement: Field + FromOkm + MapToCurve<Output = Self>;

    /// Random oracle encoding: `clear_cofactor(map_to_curve(u0) + map_to_curve(u1))`.
    ///
    /// The output distribution is statistically close to uniform in the group.
    ///
    /// # Errors
    ///
    /// When `dst` is empty, or `dst` is longer than 255 bytes and `D` cannot shorten it.
    fn hash_to_curve<D>(msg: &[&[u8]], dst: &[&[u8]]) -> Result<Self, ExpandMsgXmdError>
    where
        D: Digest + BlockSizeUser,
    {
        let mut u = [Self::FieldElement::ZERO; 2];
        hash_to_field::<D, Self::FieldElement>(msg, dst, &mut u)?;
        let q0 = u[0].map_to_curve();
        let q1 = u[1].map_to_curve();
        Ok((q0 + q1).clear_cofactor())
    }

    /// Nonuniform encoding from a single field element: `clear_cofactor(map_to_curve(u))`.
    ///
    /// # Errors
    ///
    /// See [`HashToCurve::hash_to_curve`].
    fn encode_to_curve<D>(msg: &[&[u8]], dst: &[&[u8]]) -> Result<Self, ExpandMsgXmdError>
    where
        D: Digest + BlockSizeUser,
    {
        let mut u = [Self::FieldElement::ZERO; 1];
        hash_to_field::<D, Self::FieldElement>(msg, dst, &mut u)?;
        Ok(u[0].map_to_curve().clear_cofactor())
    }
}
