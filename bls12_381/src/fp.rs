//! Base field `Fp`.

use primefield::{ByteOrder, MontyFieldElement, bigint::U384, monty_field_params};

monty_field_params!(
    name: FpParams,
    modulus: "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    uint: U384,
    byte_order: ByteOrder::BigEndian,
    multiplicative_generator: 2,
    doc: "BLS12-381 base field modulus"
);

/// Element of the 381-bit base field, serialized as 48 big-endian bytes.
pub type Fp = MontyFieldElement<FpParams, { U384::LIMBS }>;

#[cfg(test)]
mod tests {
    use super::Fp;
    use primefield::bigint::U384;

    primefield::test_primefield!(Fp, U384);

    #[test]
    fn sqrt_uses_p_3_mod_4() {
        // -1 is a non-residue, so exactly one of x and -x has a root.
        let x = Fp::from(7u64);
        assert_ne!(
            bool::from(x.sqrt().is_some()),
            bool::from((-x).sqrt().is_some())
        );
    }
}
