//! Field arithmetic checked against `num-bigint`.

use num_bigint::BigUint;
use num_traits::Num;
use primefield::{
    ByteOrder, MontyFieldElement, MontyFieldParams, bigint::U384, ff::Field, monty_field_params,
};
use proptest::prelude::*;

monty_field_params!(
    name: FpParams,
    modulus: "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    uint: U384,
    byte_order: ByteOrder::BigEndian,
    multiplicative_generator: 2,
    doc: "BLS12-381 base field modulus"
);

type Fp = MontyFieldElement<FpParams, { U384::LIMBS }>;

fn modulus() -> BigUint {
    BigUint::from_str_radix(FpParams::MODULUS_HEX, 16).unwrap()
}

fn to_biguint(fe: &Fp) -> BigUint {
    BigUint::from_bytes_be(fe.to_bytes().as_ref())
}

fn from_biguint(n: &BigUint) -> Fp {
    let bytes = n.to_bytes_be();
    let mut padded = [0u8; 48];
    padded[48 - bytes.len()..].copy_from_slice(&bytes);
    Fp::from_slice(&padded).unwrap()
}

prop_compose! {
    fn field_element()(hi in any::<[u8; 24]>(), lo in any::<[u8; 24]>()) -> Fp {
        let n = (BigUint::from_bytes_be(&hi) << 192u32) + BigUint::from_bytes_be(&lo);
        from_biguint(&(n % modulus()))
    }
}

proptest! {
    #[test]
    fn fuzzy_add(a in field_element(), b in field_element()) {
        let expected = (to_biguint(&a) + to_biguint(&b)) % modulus();
        prop_assert_eq!(a + b, from_biguint(&expected));
    }

    #[test]
    fn fuzzy_sub(a in field_element(), b in field_element()) {
        let expected = (modulus() + to_biguint(&a) - to_biguint(&b)) % modulus();
        prop_assert_eq!(a - b, from_biguint(&expected));
    }

    #[test]
    fn fuzzy_mul(a in field_element(), b in field_element()) {
        let expected = (to_biguint(&a) * to_biguint(&b)) % modulus();
        prop_assert_eq!(a * b, from_biguint(&expected));
    }

    #[test]
    fn fuzzy_square(a in field_element()) {
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fuzzy_invert(a in field_element()) {
        prop_assume!(!bool::from(a.is_zero()));
        let inv = a.invert().unwrap();
        prop_assert_eq!(a * inv, Fp::ONE);
        prop_assert_eq!(Fp::invert_vartime(primefield::bigint::Vartime::new(&a)).unwrap(), inv);
    }

    #[test]
    fn fuzzy_sqrt(a in field_element()) {
        let square = a.square();
        let root = square.sqrt().unwrap();
        prop_assert!(root == a || root == -a);
        prop_assert_eq!(square.legendre() >= 0, true);
    }

    #[test]
    fn fuzzy_wide_reduction(hi in any::<[u8; 32]>(), lo in any::<[u8; 32]>()) {
        let bytes = [hi, lo].concat();
        let expected = BigUint::from_bytes_be(&bytes) % modulus();
        prop_assert_eq!(Fp::from_be_bytes_wide(&bytes), from_biguint(&expected));
    }

    #[test]
    fn fuzzy_canonical_round_trip(a in field_element()) {
        prop_assert_eq!(Fp::from_uint(&a.to_canonical()).unwrap(), a);
    }
}
