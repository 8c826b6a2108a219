//! `map_to_curve` for G2: simplified SWU on a 3-isogenous curve with `Z = -(2 + u)`.

use super::{
    HashToCurve, Isogeny, IsogenyCoefficients, MapToCurve, OsswuMap, OsswuMapParams, Sgn0,
};
use crate::{fp::Fp, fp2::Fp2, g2::G2Projective};
use subtle::{Choice, ConditionallySelectable};

/// `sgn0(c0)`, or `sgn0(c1)` when `c0 = 0`.
impl Sgn0 for Fp2 {
    fn sgn0(&self) -> Choice {
        self.c0.is_odd() | (self.c0.is_zero() & self.c1.is_odd())
    }
}

impl OsswuMap for Fp2 {
    const PARAMS: OsswuMapParams<Self> = OsswuMapParams {
        map_a: Fp2::new(Fp::ZERO, Fp::from_u64(240)),
        map_b: Fp2::new(Fp::from_u64(1012), Fp::from_u64(1012)),
        z: Fp2::new(Fp::from_u64(2).neg(), Fp::ONE.neg()),
        minus_b_over_a: Fp2::new(
            Fp::from_hex_vartime(
                "083c12791abdd5d2fe2f284f0cc6e5aa9b8c2d3f6f3f792302cf75e62bfc4df1d6834443da498888725d8cccccccb1c3",
            ),
            Fp::from_hex_vartime(
                "11c4ff711ec210c74cec7f673684c72cc8eb1e458445999c64615cbacab4a8324828bbbad70a777747a173333332f8e8",
            ),
        ),
        b_over_za: Fp2::new(
            Fp::from_hex_vartime(
                "01a59d4b6bbf912a32d63b43028e2deeebe8d5d97ca64b6d66f64ac7a265a9305e1a40da5edb81b4e3ac4f5c28f5bd27",
            ),
            Fp::from_hex_vartime(
                "15103a07f641331bb298f5ed3ba1230aa0bcc9f87d923077324df24a0f7ffa93045d3d6f94c17ae10efa11eb851e7336",
            ),
        ),
    };
}

impl Isogeny for Fp2 {
    const COEFFICIENTS: IsogenyCoefficients<Self> = IsogenyCoefficients {
        xnum: &XNUM,
        xden: &XDEN,
        ynum: &YNUM,
        yden: &YDEN,
    };
}

impl MapToCurve for Fp2 {
    type Output = G2Projective;

    fn map_to_curve(&self) -> G2Projective {
        let (x, y) = self.osswu();
        let (x, y, z) = Fp2::isogeny(&x, &y);
        G2Projective::conditional_select(
            &G2Projective::new_unchecked(x, y, z),
            &G2Projective::IDENTITY,
            z.is_zero(),
        )
    }
}

impl HashToCurve for G2Projective {
    type FieldElement = Fp2;
}

const XNUM: [Fp2; 4] = [
    Fp2::new(
        Fp::from_hex_vartime(
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97d6",
        ),
        Fp::from_hex_vartime(
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97d6",
        ),
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71a",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71e",
        ),
        Fp::from_hex_vartime(
            "08ab05f8bdd54cde190937e76bc3e447cc27c3d6fbd7063fcd104635a790520c0a395554e5c6aaaa9354ffffffffe38d",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "171d6541fa38ccfaed6dea691f5fb614cb14b4e7f4e810aa22d6108f142b85757098e38d0f671c7188e2aaaaaaaa5ed1",
        ),
        Fp::ZERO,
    ),
];

const XDEN: [Fp2; 3] = [
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa63",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000c",
        ),
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa9f",
        ),
    ),
    Fp2::new(
        Fp::ONE,
        Fp::ZERO,
    ),
];

const YNUM: [Fp2; 4] = [
    Fp2::new(
        Fp::from_hex_vartime(
            "1530477c7ab4113b59a4c18b076d11930f7da5d4a07f649bf54439d87d27e500fc8c25ebf8c92f6812cfc71c71c6d706",
        ),
        Fp::from_hex_vartime(
            "1530477c7ab4113b59a4c18b076d11930f7da5d4a07f649bf54439d87d27e500fc8c25ebf8c92f6812cfc71c71c6d706",
        ),
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97be",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71c",
        ),
        Fp::from_hex_vartime(
            "08ab05f8bdd54cde190937e76bc3e447cc27c3d6fbd7063fcd104635a790520c0a395554e5c6aaaa9354ffffffffe38f",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "124c9ad43b6cf79bfbf7043de3811ad0761b0f37a1e26286b0e977c69aa274524e79097a56dc4bd9e1b371c71c718b10",
        ),
        Fp::ZERO,
    ),
];

const YDEN: [Fp2; 4] = [
    Fp2::new(
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa8fb",
        ),
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa8fb",
        ),
    ),
    Fp2::new(
        Fp::ZERO,
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa9d3",
        ),
    ),
    Fp2::new(
        Fp::from_hex_vartime(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000012",
        ),
        Fp::from_hex_vartime(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa99",
        ),
    ),
    Fp2::new(
        Fp::ONE,
        Fp::ZERO,
    ),
];
