//! The group G2: the order `r` subgroup of the sextic M-twist
//! `E'(Fp2): y^2 = x^3 + 4 (u + 1)`.

use crate::{fp::Fp, fp2::Fp2, scalar::Fr};
use weierstrass::{
    AffinePoint, CurveParams, ExtendedJacobianPoint, JacobianPoint, ProjectivePoint,
    point_arithmetic::EquationAIsZero,
};

#[cfg(feature = "alloc")]
use {
    crate::BLS_X,
    primefield::CanonicalLimbs,
    scalarmul::{Vartime, Word},
};

/// Curve parameters of `E'(Fp2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct G2Params;

impl CurveParams for G2Params {
    type FieldElement = Fp2;
    type Scalar = Fr;
    type PointArithmetic = EquationAIsZero;

    const EQUATION_A: Fp2 = Fp2::ZERO;
    const EQUATION_B: Fp2 = Fp2::new(Fp::from_u64(4), Fp::from_u64(4));
    const GENERATOR: (Fp2, Fp2) = (
        Fp2::new(
            Fp::from_hex_vartime(
                "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8",
            ),
            Fp::from_hex_vartime(
                "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e",
            ),
        ),
        Fp2::new(
            Fp::from_hex_vartime(
                "0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801",
            ),
            Fp::from_hex_vartime(
                "0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be",
            ),
        ),
    );
}

/// Affine G2 point.
pub type G2Affine = AffinePoint<G2Params>;

/// Projective G2 point with complete formulas.
pub type G2Projective = ProjectivePoint<G2Params>;

/// Jacobian G2 point.
pub type G2Jacobian = JacobianPoint<G2Params>;

/// Extended Jacobian (XYZZ) G2 point.
pub type G2ExtendedJacobian = ExtendedJacobianPoint<G2Params>;

/// `1 / ξ^((p - 1) / 3)`
const PSI_X: Fp2 = Fp2::new(
    Fp::ZERO,
    Fp::from_hex_vartime(
        "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaad",
    ),
);

/// `1 / ξ^((p - 1) / 2)`
const PSI_Y: Fp2 = Fp2::new(
    Fp::from_hex_vartime(
        "135203e60180a68ee2e9c448d77a2cd91c3dedd930b1cf60ef396489f61eb45e304466cf3e67fa0af1ee7b04121bdea2",
    ),
    Fp::from_hex_vartime(
        "06af0e0437ff400b6831e36d6bd17ffe48395dabc2d3435e77f76e17009241c5ee67992f72ec05f4c81084fbede3cc09",
    ),
);

/// `1 / ξ^((p^2 - 1) / 3)`, which lies in `Fp`.
const PSI2_X: Fp = Fp::from_hex_vartime(
    "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
);

/// Window width of the four-term wNAF evaluation in [`Gls::mul_gls_vartime`].
#[cfg(feature = "alloc")]
const GLS_WINDOW: usize = 4;

/// The untwist-Frobenius-twist endomorphism of G2.
pub trait Gls: Sized {
    /// `psi = twist . frobenius . untwist`, which equals `[z]Q` for `Q` in G2.
    fn psi(&self) -> Self;

    /// `psi(psi(Q))`, computed without a conjugation.
    fn psi2(&self) -> Self;

    /// `[k]Q` from the base `|z|` digits of `k`: `[|z|^i]Q = (-psi)^i(Q)`, so the four digit
    /// multiplications share one wNAF evaluation. Only valid for points of G2.
    #[cfg(feature = "alloc")]
    fn mul_gls_vartime(&self, k: Vartime<&Fr>) -> Self;
}

impl Gls for G2Projective {
    fn psi(&self) -> Self {
        let (x, y, z) = self.to_coordinates();
        Self::new_unchecked(
            x.conjugate() * PSI_X,
            y.conjugate() * PSI_Y,
            z.conjugate(),
        )
    }

    fn psi2(&self) -> Self {
        let (x, y, z) = self.to_coordinates();
        Self::new_unchecked(x.mul_by_base(&PSI2_X), -y, z)
    }

    #[cfg(feature = "alloc")]
    fn mul_gls_vartime(&self, k: Vartime<&Fr>) -> Self {
        let digits = base_x_digits(k.into_inner().canonical_limbs().to_words());

        let mut points = [*self; 4];
        for i in 1..4 {
            points[i] = -points[i - 1].psi();
        }

        let scalars = digits.each_ref().map(|d| Vartime::new(&d[..]));
        scalarmul::mul_multi_wnaf_vartime(&points, &scalars, GLS_WINDOW)
    }
}

/// Digits of `k` in base `|z|`, least significant first. `r < |z|^4`, so four suffice.
#[cfg(feature = "alloc")]
fn base_x_digits(mut k: [Word; 4]) -> [[Word; 1]; 4] {
    let mut digits = [[0]; 4];
    for digit in digits.iter_mut() {
        let mut rem = 0u128;
        for limb in k.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / u128::from(BLS_X)) as Word;
            rem = cur % u128::from(BLS_X);
        }
        digit[0] = rem as Word;
    }
    debug_assert_eq!(k, [0; 4]);
    digits
}
