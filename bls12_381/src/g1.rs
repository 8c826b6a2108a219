//! The group G1: the order `r` subgroup of `E(Fp): y^2 = x^3 + 4`.

use crate::{fp::Fp, scalar::Fr};
use weierstrass::{
    AffinePoint, CurveParams, ExtendedJacobianPoint, JacobianPoint, ProjectivePoint,
    point_arithmetic::EquationAIsZero,
};

#[cfg(feature = "alloc")]
use {
    primefield::CanonicalLimbs,
    scalarmul::{Vartime, Word},
};

/// Curve parameters of `E(Fp)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct G1Params;

impl CurveParams for G1Params {
    type FieldElement = Fp;
    type Scalar = Fr;
    type PointArithmetic = EquationAIsZero;

    const EQUATION_A: Fp = Fp::ZERO;
    const EQUATION_B: Fp = Fp::from_u64(4);
    const GENERATOR: (Fp, Fp) = (
        Fp::from_hex_vartime(
            "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb",
        ),
        Fp::from_hex_vartime(
            "08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1",
        ),
    );
}

/// Affine G1 point.
pub type G1Affine = AffinePoint<G1Params>;

/// Projective G1 point with complete formulas.
pub type G1Projective = ProjectivePoint<G1Params>;

/// Jacobian G1 point.
pub type G1Jacobian = JacobianPoint<G1Params>;

/// Extended Jacobian (XYZZ) G1 point.
pub type G1ExtendedJacobian = ExtendedJacobianPoint<G1Params>;

/// Primitive cube root of unity in `Fp` for which `phi` acts as `[z^2 - 1]` on G1.
const BETA: Fp = Fp::from_hex_vartime(
    "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
);

/// `z^2 - 1`, the eigenvalue of `phi`.
#[cfg(feature = "alloc")]
const LAMBDA: u128 = 0xac45_a401_0001_a402_0000_0000_ffff_ffff;

/// Window width of the two-term wNAF evaluation in [`Glv::mul_glv_vartime`].
#[cfg(feature = "alloc")]
const GLV_WINDOW: usize = 5;

/// The GLV endomorphism of G1.
pub trait Glv: Sized {
    /// `phi(x, y) = (beta * x, y)`, which equals `[z^2 - 1]P` for `P` in G1.
    fn phi(&self) -> Self;

    /// `[k]P` through the split `k = k0 + k1 * (z^2 - 1)` and a joint wNAF over `P` and
    /// `phi(P)`. Only valid for points of G1.
    #[cfg(feature = "alloc")]
    fn mul_glv_vartime(&self, k: Vartime<&Fr>) -> Self;
}

impl Glv for G1Projective {
    fn phi(&self) -> Self {
        let (x, y, z) = self.to_coordinates();
        Self::new_unchecked(x * BETA, y, z)
    }

    #[cfg(feature = "alloc")]
    fn mul_glv_vartime(&self, k: Vartime<&Fr>) -> Self {
        let (k0, k1) = decompose(k.into_inner().canonical_limbs().to_words());
        let k0 = split_u128(k0);
        scalarmul::mul_multi_wnaf_vartime(
            &[*self, self.phi()],
            &[Vartime::new(&k0[..]), Vartime::new(&k1[..])],
            GLV_WINDOW,
        )
    }
}

/// Long division of `k` by [`LAMBDA`], returning `(k mod LAMBDA, k / LAMBDA)`.
///
/// `k < r = LAMBDA^2 + LAMBDA + 1`, so the quotient has at most 129 bits.
#[cfg(feature = "alloc")]
fn decompose(k: [Word; 4]) -> (u128, [Word; 3]) {
    let mut quotient = [0; 3];
    let mut rem = 0u128;

    for i in (0..256).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | u128::from((k[i / 64] >> (i % 64)) & 1);
        if carry == 1 || rem >= LAMBDA {
            rem = rem.wrapping_sub(LAMBDA);
            quotient[i / 64] |= 1 << (i % 64);
        }
    }

    (rem, quotient)
}

#[cfg(feature = "alloc")]
fn split_u128(x: u128) -> [Word; 2] {
    [x as Word, (x >> 64) as Word]
}
