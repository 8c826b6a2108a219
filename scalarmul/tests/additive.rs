//! Every algorithm checked in the additive group of a 64-bit prime field, where `[k]P` is
//! simply `k * P`.

use core::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use ff::Field;
use group::Group;
use primefield::{ByteOrder, MontyFieldElement, bigint::U64, monty_field_params};
use proptest::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;
use scalarmul::{Bucket, Vartime, VartimeGroup, Word};
use subtle::{Choice, ConditionallySelectable};

monty_field_params!(
    name: GoldilocksParams,
    modulus: "ffffffff00000001",
    uint: U64,
    byte_order: ByteOrder::LittleEndian,
    multiplicative_generator: 7,
    doc: "2^64 - 2^32 + 1"
);

type Fe = MontyFieldElement<GoldilocksParams, { U64::LIMBS }>;

const ORDER: u64 = 0xffff_ffff_0000_0001;

/// `(Fe, +)` as a prime order group with generator `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Additive(Fe);

impl ConditionallySelectable for Additive {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Fe::conditional_select(&a.0, &b.0, choice))
    }
}

impl Add for Additive {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Additive> for Additive {
    type Output = Self;
    fn add(self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Additive {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Additive> for Additive {
    type Output = Self;
    fn sub(self, rhs: &Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Additive {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&Additive> for Additive {
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Additive {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl SubAssign<&Additive> for Additive {
    fn sub_assign(&mut self, rhs: &Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Additive {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Fe> for Additive {
    type Output = Self;
    fn mul(self, k: Fe) -> Self {
        Self(self.0 * k)
    }
}

impl Mul<&Fe> for Additive {
    type Output = Self;
    fn mul(self, k: &Fe) -> Self {
        Self(self.0 * k)
    }
}

impl MulAssign<Fe> for Additive {
    fn mul_assign(&mut self, k: Fe) {
        self.0 *= k;
    }
}

impl MulAssign<&Fe> for Additive {
    fn mul_assign(&mut self, k: &Fe) {
        self.0 *= k;
    }
}

impl Sum for Additive {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), Add::add)
    }
}

impl<'a> Sum<&'a Additive> for Additive {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, x| acc + x)
    }
}

impl Group for Additive {
    type Scalar = Fe;

    fn random(rng: impl RngCore) -> Self {
        Self(Fe::random(rng))
    }

    fn identity() -> Self {
        Self(Fe::ZERO)
    }

    fn generator() -> Self {
        Self(Fe::ONE)
    }

    fn is_identity(&self) -> Choice {
        self.0.is_zero()
    }

    fn double(&self) -> Self {
        Self(self.0.double())
    }
}

impl VartimeGroup for Additive {}

impl Bucket<Additive> for Additive {
    type Output = Additive;

    fn empty() -> Self {
        Self::identity()
    }

    fn add_assign_point(&mut self, point: &Additive) {
        *self += point;
    }

    fn sub_assign_point(&mut self, point: &Additive) {
        *self -= point;
    }

    fn add_bucket(&self, rhs: &Self) -> Self {
        *self + rhs
    }

    fn double_bucket(&self) -> Self {
        Group::double(self)
    }

    fn to_output(&self) -> Self {
        *self
    }
}

/// Reduce little-endian limbs modulo the group order.
fn reduce(limbs: &[Word]) -> Fe {
    // 2^64 = 2^32 - 1 (mod p)
    let radix = Fe::from_u64(0xffff_ffff);
    limbs
        .iter()
        .rev()
        .fold(Fe::ZERO, |acc, &w| acc * radix + Fe::from_u64(w))
}

fn expected(point: &Additive, limbs: &[Word]) -> Additive {
    Additive(point.0 * reduce(limbs))
}

/// Long runs of zeros and ones.
fn runs(seed: u64) -> [Word; 2] {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut limbs = [0; 2];
    let mut bit = 0;
    while bit < 128 {
        let run = 1 + (rng.next_u32() % 24) as usize;
        if rng.next_u32() & 1 == 1 {
            for i in bit..(bit + run).min(128) {
                limbs[i / 64] |= 1 << (i % 64);
            }
        }
        bit += run;
    }
    limbs
}

prop_compose! {
    fn point()(seed in any::<u64>()) -> Additive {
        Additive::random(&mut ChaCha8Rng::seed_from_u64(seed))
    }
}

prop_compose! {
    fn scalar_limbs()(strategy in 0..3u8, a in any::<u64>(), b in any::<u64>()) -> [Word; 2] {
        match strategy {
            // uniform
            0 => [a, b],
            // high Hamming weight
            1 => [a | 0x7777_7777_7777_7777, b | 0xeeee_eeee_eeee_eeee],
            _ => runs(a),
        }
    }
}

const WINDOWS: [usize; 5] = [2, 3, 5, 8, 13];

#[test]
fn boundary_scalars() {
    let p = Additive::generator().double() + Additive::generator();
    let cases: [&[Word]; 6] = [&[0], &[1], &[2], &[ORDER], &[ORDER + 1], &[0, 0, 0]];

    for limbs in cases {
        let want = expected(&p, limbs);
        let k = Vartime::new(limbs);
        assert_eq!(scalarmul::mul_double_and_add_vartime(&p, k), want);
        assert_eq!(scalarmul::mul_naf_vartime(&p, k), want);
        for window in WINDOWS {
            assert_eq!(scalarmul::mul_wnaf_vartime(&p, k, window), want, "w = {window}");
        }
    }

    assert_eq!(scalarmul::mul_double_and_add(&p, &Fe::ZERO), Additive::identity());
    assert_eq!(scalarmul::mul_fixed_window(&p, &Fe::ONE), p);
    assert_eq!(scalarmul::mul_fixed_window(&p, &Fe::from_u64(2)), p.double());
    assert_eq!(scalarmul::mul_fixed_window(&p, &-Fe::ONE), -p);
}

#[test]
fn msm_edge_sizes() {
    let none: [[Word; 1]; 0] = [];
    assert_eq!(
        scalarmul::msm_vartime::<Additive, Additive, _>(&[], Vartime::new(&none[..])),
        Additive::identity()
    );

    let p = Additive::generator();
    let single = [[5u64]];
    assert_eq!(
        scalarmul::msm_vartime::<Additive, _, _>(&[p], Vartime::new(&single[..])),
        Additive(Fe::from_u64(5))
    );

    let zeros = [[0u64; 2]; 3];
    assert_eq!(
        scalarmul::msm_unsigned_vartime::<Additive, _, _>(&[p; 3], Vartime::new(&zeros[..])),
        Additive::identity()
    );
}

#[test]
fn msm_matches_naive_at_many_sizes() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6d73_6d);
    for n in [1, 2, 8, 16, 64, 256, 1024] {
        let points: Vec<Additive> = (0..n).map(|_| Additive::random(&mut rng)).collect();
        let scalars: Vec<[Word; 2]> = (0..n).map(|_| [rng.next_u64(), rng.next_u64()]).collect();
        let scalars = Vartime::new(scalars.as_slice());

        let naive = scalarmul::msm_naive_vartime(&points, scalars);
        let want = points
            .iter()
            .zip(scalars.into_inner())
            .fold(Additive::identity(), |acc, (p, k)| acc + expected(p, k));
        assert_eq!(naive, want, "n = {n}");

        assert_eq!(scalarmul::msm_vartime::<Additive, _, _>(&points, scalars), naive, "n = {n}");
        assert_eq!(scalarmul::msm_unsigned_vartime::<Additive, _, _>(&points, scalars), naive, "n = {n}");

        #[cfg(feature = "parallel")]
        assert_eq!(scalarmul::msm_parallel_vartime::<Additive, _, _>(&points, scalars), naive, "n = {n}");
    }
}

proptest! {
    #[test]
    fn constant_time_matches_field_mul(p in point(), k in any::<u64>()) {
        let k = Fe::from_u64(k);
        let want = p * k;
        prop_assert_eq!(scalarmul::mul_double_and_add(&p, &k), want);
        prop_assert_eq!(scalarmul::mul_fixed_window(&p, &k), want);
    }

    #[test]
    fn vartime_algorithms_agree(p in point(), limbs in scalar_limbs()) {
        let k = Vartime::new(&limbs[..]);
        let want = expected(&p, &limbs);
        prop_assert_eq!(scalarmul::mul_double_and_add_vartime(&p, k), want);
        prop_assert_eq!(scalarmul::mul_naf_vartime(&p, k), want);
        for window in WINDOWS {
            prop_assert_eq!(scalarmul::mul_wnaf_vartime(&p, k, window), want);
        }
    }

    #[test]
    fn multi_wnaf(p in point(), q in point(), a in scalar_limbs(), b in scalar_limbs()) {
        let want = expected(&p, &a) + expected(&q, &b);
        let scalars = [Vartime::new(&a[..]), Vartime::new(&b[..])];
        for window in WINDOWS {
            prop_assert_eq!(scalarmul::mul_multi_wnaf_vartime(&[p, q], &scalars, window), want);
        }
    }

    #[test]
    fn msm_small(points in prop::collection::vec(point(), 0..12), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scalars: Vec<[Word; 2]> = points.iter().map(|_| runs(rng.next_u64())).collect();
        let scalars = Vartime::new(scalars.as_slice());

        let naive = scalarmul::msm_naive_vartime(&points, scalars);
        prop_assert_eq!(scalarmul::msm_vartime::<Additive, _, _>(&points, scalars), naive);
        prop_assert_eq!(scalarmul::msm_unsigned_vartime::<Additive, _, _>(&points, scalars), naive);
    }
}
