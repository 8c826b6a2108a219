//! The BLS12-381 tower `Fp -> Fp2 -> Fp6 -> Fp12` assembled from the generic constructors.
//!
//! Frobenius coefficients are derived at runtime from `δ = ξ^((p - 1) / 6)`, and the Frobenius
//! maps are checked against exponentiation by `p`.

use ff::Field;
use primefield::{ByteOrder, MontyFieldElement, MontyFieldParams, bigint::U384, monty_field_params};
use proptest::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use towers::{
    CubicExtension, CubicParams, QuadraticExtension, QuadraticFieldParams, QuadraticParams,
    TowerField,
};

monty_field_params!(
    name: FpParams,
    modulus: "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    uint: U384,
    byte_order: ByteOrder::BigEndian,
    multiplicative_generator: 2,
    doc: "BLS12-381 base field modulus"
);

type Fp = MontyFieldElement<FpParams, { U384::LIMBS }>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Fp2Params;

impl QuadraticParams for Fp2Params {
    type Base = Fp;

    fn mul_by_nonresidue(x: &Fp) -> Fp {
        -*x
    }

    fn frobenius_c1(c1: &Fp, power: usize) -> Fp {
        if power % 2 == 1 { -*c1 } else { *c1 }
    }
}

impl QuadraticFieldParams for Fp2Params {
    const NON_SQUARE_C0: Fp = Fp::ONE;
    const NON_SQUARE_C1: Fp = Fp::ONE;
}

type Fp2 = QuadraticExtension<Fp2Params>;

/// `ξ^((p - 1) / 6)` for `ξ = 1 + u`.
const DELTA: Fp2 = Fp2::new(
    Fp::from_hex_vartime(
        "1904d3bf02bb0667c231beb4202c0d1f0fd603fd3cbd5f4f7b2443d784bab9c4f67ea53d63e7813d8d0775ed92235fb8",
    ),
    Fp::from_hex_vartime(
        "fc3e2b36c4e03288e9e902231f9fb854a14787b6c7b36fec0c8ec971f63c5f282d5ac14d6c7ec22cf78a126ddc4af3",
    ),
);

/// `ξ^((p^power - 1) / 6)`, using `δ_k = δ_{k-1}^p * δ`.
fn delta(power: usize) -> Fp2 {
    (0..power).fold(Fp2::ONE, |acc, _| acc.frobenius_map(1) * DELTA)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Fp6Params;

impl CubicParams for Fp6Params {
    type Base = Fp2;

    fn mul_by_nonresidue(x: &Fp2) -> Fp2 {
        Fp2::new(x.c0 - x.c1, x.c0 + x.c1)
    }

    fn frobenius_c1(c1: &Fp2, power: usize) -> Fp2 {
        *c1 * delta(power).square()
    }

    fn frobenius_c2(c2: &Fp2, power: usize) -> Fp2 {
        *c2 * delta(power).square().square()
    }
}

type Fp6 = CubicExtension<Fp6Params>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Fp12Params;

impl QuadraticParams for Fp12Params {
    type Base = Fp6;

    fn mul_by_nonresidue(x: &Fp6) -> Fp6 {
        x.mul_by_v()
    }

    fn frobenius_c1(c1: &Fp6, power: usize) -> Fp6 {
        c1.mul_by_base(&delta(power))
    }
}

type Fp12 = QuadraticExtension<Fp12Params>;

fn modulus() -> [u64; 6] {
    FpParams::PARAMS.modulus().to_words()
}

fn random_fp2(rng: &mut ChaCha8Rng) -> Fp2 {
    Fp2::random(rng)
}

fn random_fp6(rng: &mut ChaCha8Rng) -> Fp6 {
    Fp6::new(random_fp2(rng), random_fp2(rng), random_fp2(rng))
}

fn random_fp12(rng: &mut ChaCha8Rng) -> Fp12 {
    Fp12::new(random_fp6(rng), random_fp6(rng))
}

prop_compose! {
    fn fp2()(seed in any::<u64>()) -> Fp2 {
        random_fp2(&mut ChaCha8Rng::seed_from_u64(seed))
    }
}

prop_compose! {
    fn fp6()(seed in any::<u64>()) -> Fp6 {
        random_fp6(&mut ChaCha8Rng::seed_from_u64(seed))
    }
}

prop_compose! {
    fn fp12()(seed in any::<u64>()) -> Fp12 {
        random_fp12(&mut ChaCha8Rng::seed_from_u64(seed))
    }
}

#[test]
fn delta_sixth_power() {
    // δ^6 = ξ^(p - 1) = ξ^p / ξ
    let xi = Fp2::new(Fp::ONE, Fp::ONE);
    let expected = xi.frobenius_map(1) * xi.invert().unwrap();
    assert_eq!(TowerField::pow_vartime(&DELTA, [6u64]), expected);
}

#[test]
fn fp6_frobenius_matches_pow() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let x = random_fp6(&mut rng);
    assert_eq!(x.frobenius_map(1), x.pow_vartime(modulus()));
}

#[test]
fn fp12_frobenius_matches_pow() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let x = random_fp12(&mut rng);
    assert_eq!(x.frobenius_map(1), x.pow_vartime(modulus()));
}

#[test]
fn frobenius_powers_compose() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let x = random_fp12(&mut rng);
    let mut y = x;
    for power in 1..=12 {
        y = y.frobenius_map(1);
        assert_eq!(x.frobenius_map(power), y, "power {power}");
    }
    assert_eq!(y, x);
}

proptest! {
    #[test]
    fn fp2_sqrt(a in fp2()) {
        let square = a.square();
        let root = square.sqrt().unwrap();
        prop_assert!(root == a || root == -a);
    }

    #[test]
    fn fp6_square_matches_mul(a in fp6()) {
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fp6_distributive(a in fp6(), b in fp6(), c in fp6()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
    }

    #[test]
    fn fp6_invert(a in fp6()) {
        prop_assert_eq!(a * a.invert().unwrap(), Fp6::ONE);
    }

    #[test]
    fn fp6_sparse_mul(a in fp6(), c0 in fp2(), c1 in fp2()) {
        let zero = Fp2::ZERO;
        prop_assert_eq!(a.mul_by_1(&c1), a * Fp6::new(zero, c1, zero));
        prop_assert_eq!(a.mul_by_01(&c0, &c1), a * Fp6::new(c0, c1, zero));
        prop_assert_eq!(a.mul_by_v(), a * Fp6::new(zero, Fp2::ONE, zero));
    }

    #[test]
    fn fp12_square_matches_mul(a in fp12()) {
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fp12_invert(a in fp12()) {
        prop_assert_eq!(a * a.invert().unwrap(), Fp12::ONE);
    }

    #[test]
    fn fp12_conjugate_is_frobenius_six(a in fp12()) {
        prop_assert_eq!(a.frobenius_map(6), a.conjugate());
    }

    #[test]
    fn fp12_sparse_mul(a in fp12(), c0 in fp2(), c1 in fp2(), c4 in fp2()) {
        let zero = Fp2::ZERO;
        let sparse = Fp12::new(Fp6::new(c0, c1, zero), Fp6::new(zero, c4, zero));
        prop_assert_eq!(a.mul_by_014(&c0, &c1, &c4), a * sparse);
    }
}
