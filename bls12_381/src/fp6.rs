//! Cubic extension `Fp6 = Fp2[v] / (v^3 - ξ)` with `ξ = u + 1`.

use crate::{
    fp::Fp,
    fp2::{Fp2, mul_by_xi},
};
use towers::{CubicExtension, CubicParams};

/// `ξ^((p^k - 1) / 3)` for `k = 0..6`.
const FROBENIUS_COEFF_C1: [Fp2; 6] = [
    Fp2::new(
        Fp::ONE,
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffefffe",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::ONE,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffefffe",
        ),
    ),
];

/// `ξ^(2 (p^k - 1) / 3)` for `k = 0..6`.
const FROBENIUS_COEFF_C2: [Fp2; 6] = [
    Fp2::new(
        Fp::ONE,
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaad",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaaa",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffefffe",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffeffff",
        ),
        Fp::ZERO,
    ),
];

/// Parameters of `Fp6`: `v^3 = u + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp6Params;

impl CubicParams for Fp6Params {
    type Base = Fp2;

    #[inline]
    fn mul_by_nonresidue(x: &Fp2) -> Fp2 {
        mul_by_xi(x)
    }

    #[inline]
    fn frobenius_c1(c1: &Fp2, power: usize) -> Fp2 {
        *c1 * FROBENIUS_COEFF_C1[power % 6]
    }

    #[inline]
    fn frobenius_c2(c2: &Fp2, power: usize) -> Fp2 {
        *c2 * FROBENIUS_COEFF_C2[power % 6]
    }
}

/// Element `c0 + c1 * v + c2 * v^2` of the sextic extension.
pub type Fp6 = CubicExtension<Fp6Params>;
