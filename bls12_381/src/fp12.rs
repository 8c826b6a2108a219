//! Quadratic extension `Fp12 = Fp6[w] / (w^2 - v)`, the pairing target field.

use crate::{fp::Fp, fp2::Fp2, fp6::Fp6};
use towers::{QuadraticExtension, QuadraticParams};

/// `ξ^((p^k - 1) / 6)` for `k = 0..12`.
const FROBENIUS_COEFF_C1: [Fp2; 12] = [
    Fp2::new(
        Fp::ONE,
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1904d3bf02bb0667c231beb4202c0d1f0fd603fd3cbd5f4f7b2443d784bab9c4f67ea53d63e7813d8d0775ed92235fb8",
        ),
        Fp::from_hex_vartime(
            "fc3e2b36c4e03288e9e902231f9fb854a14787b6c7b36fec0c8ec971f63c5f282d5ac14d6c7ec22cf78a126ddc4af3",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffeffff",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "135203e60180a68ee2e9c448d77a2cd91c3dedd930b1cf60ef396489f61eb45e304466cf3e67fa0af1ee7b04121bdea2",
        ),
        Fp::from_hex_vartime(
            "6af0e0437ff400b6831e36d6bd17ffe48395dabc2d3435e77f76e17009241c5ee67992f72ec05f4c81084fbede3cc09",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5f19672fdf76ce51ba69c6076a0f77eaddb3a93be6f89688de17d813620a00022e01fffffffefffe",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "144e4211384586c16bd3ad4afa99cc9170df3560e77982d0db45f3536814f0bd5871c1908bd478cd1ee605167ff82995",
        ),
        Fp::from_hex_vartime(
            "5b2cfd9013a5fd8df47fa6b48b1e045f39816240c0b8fee8beadf4d8e9c0566c63a3e6e257f87329b18fae980078116",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaaa",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "fc3e2b36c4e03288e9e902231f9fb854a14787b6c7b36fec0c8ec971f63c5f282d5ac14d6c7ec22cf78a126ddc4af3",
        ),
        Fp::from_hex_vartime(
            "1904d3bf02bb0667c231beb4202c0d1f0fd603fd3cbd5f4f7b2443d784bab9c4f67ea53d63e7813d8d0775ed92235fb8",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaac",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "6af0e0437ff400b6831e36d6bd17ffe48395dabc2d3435e77f76e17009241c5ee67992f72ec05f4c81084fbede3cc09",
        ),
        Fp::from_hex_vartime(
            "135203e60180a68ee2e9c448d77a2cd91c3dedd930b1cf60ef396489f61eb45e304466cf3e67fa0af1ee7b04121bdea2",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe699ec02408663d4de85aa0d857d89759ad4897d29650fb85f9b409427eb4f49fffd8bfd00000000aaad",
        ),
        Fp::ZERO,
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "5b2cfd9013a5fd8df47fa6b48b1e045f39816240c0b8fee8beadf4d8e9c0566c63a3e6e257f87329b18fae980078116",
        ),
        Fp::from_hex_vartime(
            "144e4211384586c16bd3ad4afa99cc9170df3560e77982d0db45f3536814f0bd5871c1908bd478cd1ee605167ff82995",
        ),
    ),
];

/// Parameters of `Fp12`: `w^2 = v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp12Params;

impl QuadraticParams for Fp12Params {
    type Base = Fp6;

    #[inline]
    fn mul_by_nonresidue(x: &Fp6) -> Fp6 {
        x.mul_by_v()
    }

    #[inline]
    fn frobenius_c1(c1: &Fp6, power: usize) -> Fp6 {
        c1.mul_by_base(&FROBENIUS_COEFF_C1[power % 12])
    }
}

/// Element `c0 + c1 * w` of the degree 12 extension.
pub type Fp12 = QuadraticExtension<Fp12Params>;
