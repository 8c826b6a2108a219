//! Fields and curve constants.

use edwards::EdwardsParams;
use primefield::{ByteOrder, MontyFieldElement, bigint::U256, monty_field_params};

/// Base field of Bandersnatch, which is the BLS12-381 scalar field.
pub type Fq = bls12_381::Fr;

monty_field_params!(
    name: FrParams,
    modulus: "1cfb69d4ca675f520cce760202687600ff8f87007419047174fd06b52876e7e1",
    uint: U256,
    byte_order: ByteOrder::LittleEndian,
    multiplicative_generator: 7,
    doc: "Order of the Banderwagon group"
);

/// Scalar field of the Banderwagon group.
pub type Fr = MontyFieldElement<FrParams, { U256::LIMBS }>;

/// Bandersnatch: `-5*x^2 + y^2 = 1 + d*x^2*y^2` over [`Fq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BandersnatchParams;

impl EdwardsParams for BandersnatchParams {
    type FieldElement = Fq;
    type Scalar = Fr;

    const EQUATION_A: Fq = Fq::from_u64(5).neg();
    const EQUATION_D: Fq = Fq::from_hex_vartime(
        "6389c12633c267cbc66e3bf86be3b6d8cb66677177e54f92b369f2f5188d58e7",
    );
    const GENERATOR: (Fq, Fq) = (
        Fq::from_hex_vartime("29c132cc2c0b34c5743711777bbe42f32b79c022ad998465e1e71866a252ae18"),
        Fq::from_hex_vartime("2a6c669eda123e0f157d8b50badcd586358cad81eee464605e3167b6cc974166"),
    );
}

#[cfg(test)]
mod tests {
    use super::{BandersnatchParams, Fq, Fr};
    use edwards::EdwardsParams;
    use ff::PrimeField;
    use primefield::bigint::U256;

    primefield::test_primefield!(Fr, U256);

    #[test]
    fn d_is_the_published_fraction() {
        // d = 138827208126141220649022263972958607803 / 171449701953573178309673572579671231137
        let num = Fq::from_u128(138827208126141220649022263972958607803);
        let den = Fq::from_u128(171449701953573178309673572579671231137);
        assert_eq!(BandersnatchParams::EQUATION_D * den, num);
    }

    #[test]
    fn curve_constants_are_non_squares() {
        assert_eq!(BandersnatchParams::EQUATION_A.legendre(), -1);
        assert_eq!(BandersnatchParams::EQUATION_D.legendre(), -1);
    }
}
