//! Batch inversion.

use ff::Field;

/// Invert every element of `values` in place with a single field inversion
/// (Montgomery's trick).
///
/// Zero entries are left as zero and do not affect the other results. `scratch` must be at
/// least as long as `values`; its contents are overwritten.
///
/// # Panics
///
/// If `scratch` is shorter than `values`.
pub fn batch_invert<F: Field>(values: &mut [F], scratch: &mut [F]) {
    assert!(scratch.len() >= values.len(), "scratch buffer too small");

    let mut acc = F::ONE;
    for (value, prefix) in values.iter().zip(scratch.iter_mut()) {
        *prefix = acc;
        acc = F::conditional_select(&(acc * value), &acc, value.is_zero());
    }

    // `acc` is a product of non-zero elements.
    acc = acc.invert().unwrap_or(F::ZERO);

    for (value, prefix) in values.iter_mut().zip(scratch.iter()).rev() {
        let is_zero = value.is_zero();
        let inverse = acc * prefix;
        let next_acc = acc * *value;
        acc = F::conditional_select(&next_acc, &acc, is_zero);
        *value = F::conditional_select(&inverse, &F::ZERO, is_zero);
    }
}

#[cfg(test)]
mod tests {
    use super::batch_invert;
    use crate::{ByteOrder, MontyFieldElement, monty_field_params};
    use bigint::U256;
    use ff::Field;

    monty_field_params!(
        name: FieldParams,
        modulus: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        uint: U256,
        byte_order: ByteOrder::BigEndian,
        multiplicative_generator: 6,
        doc: "P-256 field modulus"
    );

    type FieldElement = MontyFieldElement<FieldParams, { U256::LIMBS }>;

    #[test]
    fn matches_individual_inversion() {
        let originals: [FieldElement; 5] = [1u64, 2, 3, 0xffff_ffff, 12345].map(FieldElement::from);
        let mut values = originals;
        let mut scratch = [FieldElement::ZERO; 5];
        batch_invert(&mut values, &mut scratch);

        for (inv, x) in values.iter().zip(originals.iter()) {
            assert_eq!(*inv, x.invert().unwrap());
        }
    }

    #[test]
    fn zeros_are_skipped() {
        let originals = [
            FieldElement::ZERO,
            FieldElement::from(5u64),
            FieldElement::ZERO,
            FieldElement::from(7u64),
        ];
        let mut values = originals;
        let mut scratch = [FieldElement::ZERO; 4];
        batch_invert(&mut values, &mut scratch);

        assert_eq!(values[0], FieldElement::ZERO);
        assert_eq!(values[1], FieldElement::from(5u64).invert().unwrap());
        assert_eq!(values[2], FieldElement::ZERO);
        assert_eq!(values[3], FieldElement::from(7u64).invert().unwrap());
    }

    #[test]
    fn empty_batch() {
        let mut values: [FieldElement; 0] = [];
        batch_invert(&mut values, &mut []);
    }
}
