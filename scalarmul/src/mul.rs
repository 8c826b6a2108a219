//! Single-point scalar multiplication.

use crate::{LookupTable, VartimeGroup};
use bigint::{Vartime, Word};
use ff::PrimeField;
use group::Group;
use primefield::CanonicalLimbs;
use subtle::{Choice, ConditionallySelectable};

#[cfg(feature = "alloc")]
use {
    crate::recode::wnaf,
    alloc::{vec, vec::Vec},
};

const WORD_BITS: usize = Word::BITS as usize;

/// Largest supported scalar, in limbs.
const MAX_LIMBS: usize = 8;

/// Signed radix-16 digits for the largest supported scalar, plus one for the carry.
const MAX_DIGITS: usize = MAX_LIMBS * 16 + 1;

/// Multiply by a secret scalar with an always-add ladder.
///
/// Runs `Scalar::NUM_BITS` iterations of one doubling, one addition and one conditional
/// select, regardless of the scalar's value.
pub fn mul_double_and_add<G>(point: &G, scalar: &G::Scalar) -> G
where
    G: Group + ConditionallySelectable,
    G::Scalar: CanonicalLimbs,
{
    let limbs = scalar.canonical_limbs();
    let limbs = limbs.as_ref();
    let mut acc = G::identity();

    for i in (0..G::Scalar::NUM_BITS as usize).rev() {
        acc = acc.double();
        let sum = acc + point;
        let bit = (limbs[i / WORD_BITS] >> (i % WORD_BITS)) & 1;
        acc.conditional_assign(&sum, Choice::from(bit as u8));
    }

    acc
}

/// Returns `[a_0, ..., a_n]` such that `sum(a_j * 16^j) == x` and `-8 <= a_j < 8`, where
/// `n = ceil(bits / 4)`.
fn to_radix_16(limbs: &[Word], bits: usize) -> ([i8; MAX_DIGITS], usize) {
    let len = bits.div_ceil(4);
    debug_assert!(len < MAX_DIGITS && len <= limbs.len() * 16);
    let mut output = [0i8; MAX_DIGITS];

    // Step 1: change radix.
    for (i, digit) in output.iter_mut().take(len).enumerate() {
        *digit = ((limbs[i / 16] >> ((i % 16) * 4)) & 0xf) as i8;
    }

    // Step 2: recenter coefficients from [0,16) to [-8,8)
    for i in 0..len {
        let carry = (output[i] + 8) >> 4;
        output[i] -= carry << 4;
        output[i + 1] += carry;
    }

    (output, len + 1)
}

/// Multiply by a secret scalar with a fixed 4-bit signed window.
///
/// Each window reads every entry of a `[P, 2P, ..., 8P]` table, so neither the sequence of
/// operations nor the memory access pattern depends on the scalar.
///
/// # Panics
///
/// If the scalar field is wider than 512 bits.
pub fn mul_fixed_window<G>(point: &G, scalar: &G::Scalar) -> G
where
    G: Group + ConditionallySelectable,
    G::Scalar: CanonicalLimbs,
{
    let limbs = scalar.canonical_limbs();
    assert!(limbs.as_ref().len() <= MAX_LIMBS, "scalar too wide");

    let (digits, len) = to_radix_16(limbs.as_ref(), G::Scalar::NUM_BITS as usize);
    let table = LookupTable::new(point);

    let mut acc = table.select(digits[len - 1]);
    for i in (0..len - 1).rev() {
        for _ in 0..4 {
            acc = acc.double();
        }
        acc += table.select(digits[i]);
    }

    acc
}

/// Multiply by a public scalar with left-to-right double-and-add.
///
/// The scalar may be unreduced; only its significant bits are visited.
pub fn mul_double_and_add_vartime<G: VartimeGroup>(point: &G, scalar: Vartime<&[Word]>) -> G {
    let limbs = scalar.into_inner();
    let mut acc = G::identity();

    for i in (0..limbs.len() * WORD_BITS).rev() {
        if !acc.is_identity_vartime() {
            acc = acc.double_vartime();
        }
        if (limbs[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1 {
            acc = acc.add_vartime(point);
        }
    }

    acc
}

/// Odd multiples `[P, 3P, 5P, ..., (2^(window - 1) - 1)P]`.
#[cfg(feature = "alloc")]
fn odd_multiples<G: VartimeGroup>(point: &G, window: usize) -> Vec<G> {
    let len = 1 << (window - 2);
    let double = point.double_vartime();

    let mut table = Vec::with_capacity(len);
    table.push(*point);
    for i in 1..len {
        let next = table[i - 1].add_vartime(&double);
        table.push(next);
    }
    table
}

/// Interleaved evaluation of `sum(digits_i * table_i)` with one shared doubling chain.
#[cfg(feature = "alloc")]
fn eval_wnaf<G: VartimeGroup>(tables: &[Vec<G>], digits: &[Vec<i32>]) -> G {
    let len = digits.iter().map(Vec::len).max().unwrap_or(0);
    let mut acc = G::identity();

    for i in (0..len).rev() {
        if !acc.is_identity_vartime() {
            acc = acc.double_vartime();
        }

        for (table, digits) in tables.iter().zip(digits) {
            match digits.get(i).copied().unwrap_or(0) {
                0 => (),
                d if d > 0 => acc = acc.add_vartime(&table[(d / 2) as usize]),
                d => acc = acc.add_vartime(&-table[(-d / 2) as usize]),
            }
        }
    }

    acc
}

/// Multiply by a public scalar using its width-`window` NAF.
///
/// Precomputes `2^(window - 2)` odd multiples, then performs one addition per non-zero
/// digit.
///
/// # Panics
///
/// If `window` is outside `2..=16`.
#[cfg(feature = "alloc")]
pub fn mul_wnaf_vartime<G: VartimeGroup>(point: &G, scalar: Vartime<&[Word]>, window: usize) -> G {
    let digits = wnaf(scalar, window);
    eval_wnaf(&[odd_multiples(point, window)], &[digits])
}

/// Multiply by a public scalar using its signed binary NAF.
#[cfg(feature = "alloc")]
pub fn mul_naf_vartime<G: VartimeGroup>(point: &G, scalar: Vartime<&[Word]>) -> G {
    mul_wnaf_vartime(point, scalar, 2)
}

/// Compute `sum([k_i] P_i)` for public scalars with interleaved wNAF (Straus' trick).
///
/// Used by the endomorphism-accelerated multiplications, where the scalars are about half
/// (GLV) or a quarter (GLS) of the scalar field width.
///
/// # Panics
///
/// If `points` and `scalars` differ in length, or `window` is outside `2..=16`.
#[cfg(feature = "alloc")]
pub fn mul_multi_wnaf_vartime<G: VartimeGroup>(
    points: &[G],
    scalars: &[Vartime<&[Word]>],
    window: usize,
) -> G {
    assert_eq!(points.len(), scalars.len(), "length mismatch");

    let mut tables = vec![];
    let mut digits = vec![];
    for (point, &scalar) in points.iter().zip(scalars) {
        tables.push(odd_multiples(point, window));
        digits.push(wnaf(scalar, window));
    }

    eval_wnaf(&tables, &digits)
}
