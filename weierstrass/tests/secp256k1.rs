//! secp256k1 (`a = 0`), exercising the specialized formulas.

use primefield::{ByteOrder, MontyFieldElement, bigint::U256, monty_field_params};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use weierstrass::{
    AffinePoint, CurveParams, ExtendedJacobianPoint, JacobianPoint, ProjectivePoint,
    ff::Field,
    group::{Curve, Group},
    point_arithmetic::{EquationAIsGeneric, EquationAIsZero},
    scalarmul::{self, Vartime, Word},
};

monty_field_params!(
    name: FieldParams,
    modulus: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    uint: U256,
    byte_order: ByteOrder::BigEndian,
    multiplicative_generator: 3,
    doc: "secp256k1 field modulus"
);

monty_field_params!(
    name: ScalarParams,
    modulus: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    uint: U256,
    byte_order: ByteOrder::BigEndian,
    multiplicative_generator: 7,
    doc: "secp256k1 group order"
);

type FieldElement = MontyFieldElement<FieldParams, { U256::LIMBS }>;
type Scalar = MontyFieldElement<ScalarParams, { U256::LIMBS }>;

const GENERATOR: (FieldElement, FieldElement) = (
    FieldElement::from_hex_vartime(
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    ),
    FieldElement::from_hex_vartime(
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    ),
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Secp256k1;

impl CurveParams for Secp256k1 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;
    type PointArithmetic = EquationAIsZero;

    const EQUATION_A: FieldElement = FieldElement::ZERO;
    const EQUATION_B: FieldElement = FieldElement::from_u64(7);
    const GENERATOR: (FieldElement, FieldElement) = GENERATOR;
}

/// The same curve driven through the generic-`a` formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Secp256k1Generic;

impl CurveParams for Secp256k1Generic {
    type FieldElement = FieldElement;
    type Scalar = Scalar;
    type PointArithmetic = EquationAIsGeneric;

    const EQUATION_A: FieldElement = FieldElement::ZERO;
    const EQUATION_B: FieldElement = FieldElement::from_u64(7);
    const GENERATOR: (FieldElement, FieldElement) = GENERATOR;
}

const ORDER: [Word; 4] = [
    0xbfd2_5e8c_d036_4141,
    0xbaae_dce6_af48_a03b,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
];

/// `[k]G` for `k = 1, 2, 3, 4`.
const MUL_VECTORS: [(&str, &str); 4] = [
    (
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    ),
    (
        "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
        "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a",
    ),
    (
        "f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9",
        "388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672",
    ),
    (
        "e493dbf1c10d80f3581e4904930b1404cc6c13900ee0758474fa94abe8c4cd13",
        "51ed993ea0d455b75642e2098ea51448d967ae33bfbdfe40cfe97bdc47739922",
    ),
];

fn assert_point_eq<C>(actual: AffinePoint<C>, (x, y): (&str, &str))
where
    C: CurveParams<FieldElement = FieldElement>,
{
    assert_eq!(actual.x(), FieldElement::from_hex_vartime(x));
    assert_eq!(actual.y(), FieldElement::from_hex_vartime(y));
}

#[test]
fn repeated_add_matches_vectors() {
    let g = ProjectivePoint::<Secp256k1>::GENERATOR;
    let mut p = g;
    let mut j = JacobianPoint::<Secp256k1>::GENERATOR;
    let mut e = ExtendedJacobianPoint::<Secp256k1>::GENERATOR;

    for vector in MUL_VECTORS {
        assert_point_eq(p.to_affine(), vector);
        assert_point_eq(j.to_affine(), vector);
        assert_point_eq(e.to_affine(), vector);
        p += g;
        j = j.add_vartime(&JacobianPoint::GENERATOR);
        e += g.to_affine();
    }
}

#[test]
fn scalar_mul_matches_vectors() {
    let g = ProjectivePoint::<Secp256k1>::GENERATOR;
    for (k, vector) in (1u64..).zip(MUL_VECTORS) {
        assert_point_eq((g * Scalar::from_u64(k)).to_affine(), vector);
        assert_point_eq(scalarmul::mul_naf_vartime(&g, Vartime::new(&[k])).to_affine(), vector);
    }
}

#[test]
fn specialized_formulas_match_generic() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6b32_3536);
    for _ in 0..16 {
        let k = Scalar::random(&mut rng);
        let l = Scalar::random(&mut rng);

        let p = ProjectivePoint::<Secp256k1>::GENERATOR * k;
        let q = ProjectivePoint::<Secp256k1>::GENERATOR * l;
        let pg = ProjectivePoint::<Secp256k1Generic>::GENERATOR * k;
        let qg = ProjectivePoint::<Secp256k1Generic>::GENERATOR * l;

        let sum = (p + q).to_affine();
        let sum_generic = (pg + qg).to_affine();
        assert_eq!(sum.x(), sum_generic.x());
        assert_eq!(sum.y(), sum_generic.y());

        let double = p.double().to_affine();
        let double_generic = pg.double().to_affine();
        assert_eq!(double.x(), double_generic.x());
        assert_eq!(double.y(), double_generic.y());

        let mixed = p.add_mixed(&q.to_affine()).to_affine();
        let mixed_generic = pg.add_mixed(&qg.to_affine()).to_affine();
        assert_eq!(mixed.x(), mixed_generic.x());
        assert_eq!(mixed.y(), mixed_generic.y());
    }
}

#[test]
fn random_affine_points_are_on_curve() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..16 {
        let p = AffinePoint::<Secp256k1>::random(&mut rng);
        assert!(bool::from(p.is_on_curve()));
        assert!(!bool::from(p.is_identity()));

        let recovered = AffinePoint::<Secp256k1>::from_x(p.x()).unwrap();
        assert!(recovered == p || recovered == -p);
    }

    // x = 0 would need y^2 = 7, which is a non-residue mod p.
    assert!(bool::from(AffinePoint::<Secp256k1>::from_x(FieldElement::ZERO).is_none()));
}

#[test]
fn msm_matches_naive() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6d73_6d);
    for n in [0usize, 1, 2, 8, 64, 256] {
        let mut points: Vec<_> = (0..n)
            .map(|_| ProjectivePoint::<Secp256k1>::random(&mut rng))
            .collect();
        if n >= 8 {
            points[4] = points[5];
            points[6] = -points[5];
            points[7] = ProjectivePoint::IDENTITY;
        }
        let mut scalars: Vec<U256> = (0..n)
            .map(|_| Scalar::random(&mut rng).to_canonical())
            .collect();
        if n >= 2 {
            scalars[0] = U256::ZERO;
            scalars[1] = U256::MAX;
        }

        let mut affine = vec![AffinePoint::IDENTITY; n];
        ProjectivePoint::batch_normalize(&points, &mut affine);
        let scalars = Vartime::new(scalars.as_slice());

        let expected = scalarmul::msm_naive_vartime(&points, scalars);
        assert_eq!(
            scalarmul::msm_vartime::<ExtendedJacobianPoint<Secp256k1>, _, _>(&affine, scalars),
            expected,
            "n = {n}"
        );
        assert_eq!(
            scalarmul::msm_vartime::<ProjectivePoint<Secp256k1>, _, _>(&affine, scalars),
            expected,
            "n = {n}"
        );
        assert_eq!(
            scalarmul::msm_unsigned_vartime::<ProjectivePoint<Secp256k1>, _, _>(&affine, scalars),
            expected,
            "n = {n}"
        );
    }
}

mod projective {
    use super::*;

    weierstrass::impl_group_law_tests!(
        point: ProjectivePoint<Secp256k1>,
        affine: AffinePoint<Secp256k1>,
        field: FieldElement,
        scalar: Scalar,
        order: ORDER
    );
}

mod jacobian {
    use super::*;

    weierstrass::impl_group_law_tests!(
        point: JacobianPoint<Secp256k1>,
        affine: AffinePoint<Secp256k1>,
        field: FieldElement,
        scalar: Scalar,
        order: ORDER
    );
}

mod xyzz {
    use super::*;

    weierstrass::impl_group_law_tests!(
        point: ExtendedJacobianPoint<Secp256k1>,
        affine: AffinePoint<Secp256k1>,
        field: FieldElement,
        scalar: Scalar,
        order: ORDER
    );
}
