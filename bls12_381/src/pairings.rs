//! The optimal ate pairing `e: G1 x G2 -> Gt`.

use crate::{
    BLS_X, Fr,
    fp::Fp,
    fp2::Fp2,
    fp6::Fp6,
    fp12::Fp12,
    g1::G1Affine,
    g2::G2Affine,
};
use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use ff::Field;
use group::Group;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use towers::TowerField;

/// `(z - 1)^2 / 3`, the first factor of the hard part of the final exponentiation.
const HARD_PART_EXP: [u64; 2] = [0x8c00_aaab_0000_aaab, 0x396c_8c00_5555_e156];

/// Element of the order `r` subgroup of `Fp12^*`, written additively.
///
/// Group addition is multiplication in `Fp12` and negation is conjugation.
#[derive(Copy, Clone)]
pub struct Gt(pub(crate) Fp12);

impl Gt {
    /// The neutral element, `1` in `Fp12`.
    pub const IDENTITY: Self = Self(Fp12::ONE);

    /// `e(G1, G2)` for the fixed generators of the source groups.
    pub const GENERATOR: Self = Self(Fp12::new(
        Fp6::new(
            fp2(
                "11619b45f61edfe3b47a15fac19442526ff489dcda25e59121d9931438907dfd448299a87dde3a649bdba96e84d54558",
                "153ce14a76a53e205ba8f275ef1137c56a566f638b52d34ba3bf3bf22f277d70f76316218c0dfd583a394b8448d2be7f",
            ),
            fp2(
                "095668fb4a02fe930ed44767834c915b283b1c6ca98c047bd4c272e9ac3f3ba6ff0b05a93e59c71fba77bce995f04692",
                "16deedaa683124fe7260085184d88f7d036b86f53bb5b7f1fc5e248814782065413e7d958d17960109ea006b2afdeb5f",
            ),
            fp2(
                "09c92cf02f3cd3d2f9d34bc44eee0dd50314ed44ca5d30ce6a9ec0539be7a86b121edc61839ccc908c4bdde256cd6048",
                "111061f398efc2a97ff825b04d21089e24fd8b93a47e41e60eae7e9b2a38d54fa4dedced0811c34ce528781ab9e929c7",
            ),
        ),
        Fp6::new(
            fp2(
                "01ecfcf31c86257ab00b4709c33f1c9c4e007659dd5ffc4a735192167ce197058cfb4c94225e7f1b6c26ad9ba68f63bc",
                "08890726743a1f94a8193a166800b7787744a8ad8e2f9365db76863e894b7a11d83f90d873567e9d645ccf725b32d26f",
            ),
            fp2(
                "0e61c752414ca5dfd258e9606bac08daec29b3e2c57062669556954fb227d3f1260eedf25446a086b0844bcd43646c10",
                "0fe63f185f56dd29150fc498bbeea78969e7e783043620db33f75a05a0a2ce5c442beaff9da195ff15164c00ab66bdde",
            ),
            fp2(
                "10900338a92ed0b47af211636f7cfdec717b7ee43900eee9b5fc24f0000c5874d4801372db478987691c566a8c474978",
                "1454814f3085f0e6602247671bc408bbce2007201536818c901dbd4d2095dd86c1ec8b888e59611f60a301af7776be3d",
            ),
        ),
    ));

    /// The underlying `Fp12` element.
    pub fn to_fp12(&self) -> Fp12 {
        self.0
    }

    /// Is this the neutral element?
    pub fn is_identity(&self) -> Choice {
        self.0.ct_eq(&Fp12::ONE)
    }

    /// `self + self`, a squaring in `Fp12`.
    pub fn double(&self) -> Self {
        Self(self.0.square())
    }

    /// `-self`, the conjugate, which is the inverse on the cyclotomic subgroup.
    pub fn neg(&self) -> Self {
        Self(self.0.conjugate())
    }

    /// `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0)
    }

    /// `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0.conjugate())
    }

    /// `[k]self` in constant time.
    pub fn mul(&self, k: &Fr) -> Self {
        scalarmul::mul_fixed_window(self, k)
    }
}

const fn fp2(c0: &str, c1: &str) -> Fp2 {
    Fp2::new(Fp::from_hex_vartime(c0), Fp::from_hex_vartime(c1))
}

impl fmt::Debug for Gt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Gt").field(&self.0).finish()
    }
}

impl Default for Gt {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for Gt {}

impl PartialEq for Gt {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

macro_rules! impl_gt_binary {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $method:ident) => {
        impl $op<Gt> for Gt {
            type Output = Gt;

            fn $op_fn(self, rhs: Gt) -> Gt {
                Gt::$method(&self, &rhs)
            }
        }

        impl $op<&Gt> for Gt {
            type Output = Gt;

            fn $op_fn(self, rhs: &Gt) -> Gt {
                Gt::$method(&self, rhs)
            }
        }

        impl $op<&Gt> for &Gt {
            type Output = Gt;

            fn $op_fn(self, rhs: &Gt) -> Gt {
                Gt::$method(self, rhs)
            }
        }

        impl $assign<Gt> for Gt {
            fn $assign_fn(&mut self, rhs: Gt) {
                *self = Gt::$method(self, &rhs);
            }
        }

        impl $assign<&Gt> for Gt {
            fn $assign_fn(&mut self, rhs: &Gt) {
                *self = Gt::$method(self, rhs);
            }
        }
    };
}

impl_gt_binary!(Add, add, AddAssign, add_assign, add);
impl_gt_binary!(Sub, sub, SubAssign, sub_assign, sub);

impl Neg for Gt {
    type Output = Gt;

    fn neg(self) -> Gt {
        Gt::neg(&self)
    }
}

impl Neg for &Gt {
    type Output = Gt;

    fn neg(self) -> Gt {
        Gt::neg(self)
    }
}

impl<S: Borrow<Fr>> Mul<S> for Gt {
    type Output = Gt;

    fn mul(self, k: S) -> Gt {
        Gt::mul(&self, k.borrow())
    }
}

impl<S: Borrow<Fr>> Mul<S> for &Gt {
    type Output = Gt;

    fn mul(self, k: S) -> Gt {
        Gt::mul(self, k.borrow())
    }
}

impl<S: Borrow<Fr>> MulAssign<S> for Gt {
    fn mul_assign(&mut self, k: S) {
        *self = Gt::mul(self, k.borrow());
    }
}

impl Sum for Gt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |a, b| a + b)
    }
}

impl<'a> Sum<&'a Gt> for Gt {
    fn sum<I: Iterator<Item = &'a Gt>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |a, b| a + b)
    }
}

impl Group for Gt {
    type Scalar = Fr;

    fn random(mut rng: impl RngCore) -> Self {
        Self::GENERATOR * Fr::random(&mut rng)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        Self::GENERATOR
    }

    fn is_identity(&self) -> Choice {
        Gt::is_identity(self)
    }

    fn double(&self) -> Self {
        Gt::double(self)
    }
}

/// Output of the Miller loop, before the final exponentiation.
///
/// Results of several loops may be added, which multiplies them in `Fp12`; one final
/// exponentiation of the sum then yields the product of the pairings.
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        Self(Fp12::ONE)
    }
}

impl MillerLoopResult {
    /// Raise to `(p^12 - 1) / r`.
    ///
    /// The easy part `(p^6 - 1)(p^2 + 1)` uses one inversion and Frobenius maps. The hard
    /// part `(p^4 - p^2 + 1) / r` is evaluated as `((z - 1)^2 / 3)(z + p)(z^2 + p^2 - 1) + 1`.
    pub fn final_exponentiation(&self) -> Gt {
        let f = self.0;
        let f1 = f.conjugate() * f.invert().unwrap_or(Fp12::ZERO);
        let f2 = f1.frobenius_map(2) * f1;

        let a = f2.pow_vartime(HARD_PART_EXP);
        let b = pow_x(&a) * a.frobenius_map(1);
        let c = pow_x(&pow_x(&b)) * b.frobenius_map(2) * b.conjugate();
        Gt(c * f2)
    }
}

/// `f^z` for `f` in the cyclotomic subgroup, where inversion is conjugation.
fn pow_x(f: &Fp12) -> Fp12 {
    f.pow_vartime([BLS_X]).conjugate()
}

impl Add for MillerLoopResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl AddAssign for MillerLoopResult {
    fn add_assign(&mut self, rhs: Self) {
        self.0 *= rhs.0;
    }
}

/// Line coefficients `(c0, c1, c4)`: the line evaluated at `P = (xp, yp)` is the sparse
/// `Fp12` element `c0 + (c1 xp) v + (c4 yp) v w`.
type LineCoeffs = (Fp2, Fp2, Fp2);

/// A G2 point with the Miller loop line coefficients precomputed, for pairing against many
/// G1 points.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<LineCoeffs>,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> Self {
        let infinity = q.is_identity();
        let q = G2Affine::conditional_select(&q, &G2Affine::GENERATOR, infinity);

        let mut coeffs = Vec::with_capacity(68);
        let mut t = LineState {
            x: q.x(),
            y: q.y(),
            z: Fp2::ONE,
        };

        for i in (0..63).rev() {
            coeffs.push(t.doubling_step());
            if (BLS_X >> i) & 1 == 1 {
                coeffs.push(t.addition_step(&q));
            }
        }

        Self { infinity, coeffs }
    }
}

impl From<&G2Affine> for G2Prepared {
    fn from(q: &G2Affine) -> Self {
        Self::from(*q)
    }
}

/// The running point `T` of the Miller loop in Jacobian coordinates on the twist.
struct LineState {
    x: Fp2,
    y: Fp2,
    z: Fp2,
}

impl LineState {
    /// `T = 2T`, returning the tangent line at the old `T`.
    fn doubling_step(&mut self) -> LineCoeffs {
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();
        let zz = self.z.square();

        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();

        let line = (e * self.x - b.double(), -(e * zz), z3 * zz);
        self.x = x3;
        self.y = y3;
        self.z = z3;
        line
    }

    /// `T = T + Q`, returning the line through the old `T` and `Q`.
    fn addition_step(&mut self, q: &G2Affine) -> LineCoeffs {
        let (xq, yq) = (q.x(), q.y());
        let zz = self.z.square();
        let u2 = xq * zz;
        let s2 = yq * self.z * zz;
        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let rr = (s2 - self.y).double();
        let v = self.x * i;

        let x3 = rr.square() - j - v.double();
        let y3 = rr * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - zz - hh;

        let line = (rr * xq - yq * z3, -rr, z3);
        self.x = x3;
        self.y = y3;
        self.z = z3;
        line
    }
}

/// Product of the Miller loops of all `(P, Q)` terms, sharing the squarings.
///
/// Terms where either point is the identity contribute `1`; they are evaluated on the
/// generators and discarded in constant time.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let terms: Vec<(G1Affine, Choice, &[LineCoeffs])> = terms
        .iter()
        .map(|(p, q)| {
            let skip = p.is_identity() | q.infinity;
            let p = G1Affine::conditional_select(p, &G1Affine::GENERATOR, p.is_identity());
            (p, skip, q.coeffs.as_slice())
        })
        .collect();

    let mut f = Fp12::ONE;
    let mut index = 0;
    let apply_lines = |f: &mut Fp12, step: usize| {
        for (p, skip, coeffs) in &terms {
            let line = ell(f, &coeffs[step], p);
            f.conditional_assign(&line, !*skip);
        }
    };

    for i in (0..63).rev() {
        f = f.square();
        apply_lines(&mut f, index);
        index += 1;
        if (BLS_X >> i) & 1 == 1 {
            apply_lines(&mut f, index);
            index += 1;
        }
    }

    // z < 0
    MillerLoopResult(f.conjugate())
}

/// Multiply `f` by the line with coefficients `coeffs` evaluated at `p`.
fn ell(f: &Fp12, coeffs: &LineCoeffs, p: &G1Affine) -> Fp12 {
    let (c0, c1, c4) = coeffs;
    let c1 = c1.mul_by_base(&p.x());
    let c4 = c4.mul_by_base(&p.y());
    f.mul_by_014(c0, &c1, &c4)
}

/// The Miller loop of a single pair, preparing `q` on the fly.
pub fn miller_loop(p: &G1Affine, q: &G2Affine) -> MillerLoopResult {
    let q = G2Prepared::from(q);
    multi_miller_loop(&[(p, &q)])
}

/// The optimal ate pairing `e(P, Q)`.
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    miller_loop(p, q).final_exponentiation()
}

#[cfg(test)]
mod tests {
    use super::{G2Prepared, Gt, MillerLoopResult, miller_loop, multi_miller_loop, pairing};
    use crate::{Fp12, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
    use ff::Field;
    use group::Group;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    #[test]
    fn generator_pairing() {
        let e = pairing(&G1Affine::GENERATOR, &G2Affine::GENERATOR);
        assert_eq!(e, Gt::GENERATOR);
        assert_ne!(e, Gt::IDENTITY);
    }

    #[test]
    fn bilinearity() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let a = Fr::random(&mut rng);
        let b = Fr::random(&mut rng);
        let p = (G1Projective::GENERATOR * a).to_affine();
        let q = (G2Projective::GENERATOR * b).to_affine();

        let expected = Gt::GENERATOR * (a * b);
        assert_eq!(pairing(&p, &q), expected);
        assert_eq!(pairing(&G1Affine::GENERATOR, &q) * a, expected);
        assert_eq!(pairing(&p, &G2Affine::GENERATOR) * b, expected);
        assert_eq!(pairing(&(-p), &q), -expected);
    }

    #[test]
    fn additive_in_each_argument() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let p1 = G1Projective::random(&mut rng);
        let p2 = G1Projective::random(&mut rng);
        let q = G2Projective::random(&mut rng).to_affine();

        let lhs = pairing(&(p1 + p2).to_affine(), &q);
        let rhs = pairing(&p1.to_affine(), &q) + pairing(&p2.to_affine(), &q);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn identity_inputs() {
        assert_eq!(pairing(&G1Affine::IDENTITY, &G2Affine::GENERATOR), Gt::IDENTITY);
        assert_eq!(pairing(&G1Affine::GENERATOR, &G2Affine::IDENTITY), Gt::IDENTITY);
        assert_eq!(pairing(&G1Affine::IDENTITY, &G2Affine::IDENTITY), Gt::IDENTITY);
        assert_eq!(MillerLoopResult::default().final_exponentiation(), Gt::IDENTITY);
    }

    #[test]
    fn multi_miller_loop_matches_product() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let ps = [
            G1Projective::random(&mut rng).to_affine(),
            G1Affine::IDENTITY,
            G1Projective::random(&mut rng).to_affine(),
        ];
        let qs = [
            G2Projective::random(&mut rng).to_affine(),
            G2Projective::random(&mut rng).to_affine(),
            G2Affine::IDENTITY,
        ];
        let prepared = qs.map(G2Prepared::from);

        let terms = [
            (&ps[0], &prepared[0]),
            (&ps[1], &prepared[1]),
            (&ps[2], &prepared[2]),
        ];
        let expected: Gt = ps.iter().zip(&qs).map(|(p, q)| pairing(p, q)).sum();
        assert_eq!(multi_miller_loop(&terms).final_exponentiation(), expected);
        assert_eq!(expected, pairing(&ps[0], &qs[0]));

        let split = multi_miller_loop(&terms[..1]) + multi_miller_loop(&terms[1..]);
        assert_eq!(split.final_exponentiation(), expected);

        let single = miller_loop(&ps[0], &qs[0]) + miller_loop(&ps[2], &qs[2]);
        assert_eq!(single.final_exponentiation(), expected);
    }

    #[test]
    fn pairing_check_of_a_signature_equation() {
        // e(sk G1, H) == e(G1, sk H)
        let mut rng = ChaCha8Rng::seed_from_u64(44);
        let sk = Fr::random(&mut rng);
        let h = G2Projective::random(&mut rng);
        let pk = (G1Projective::GENERATOR * sk).to_affine();
        let sig = (h * sk).to_affine();

        let h = G2Prepared::from(h.to_affine());
        let sig = G2Prepared::from(sig);
        let neg_g1 = -G1Affine::GENERATOR;
        let result = multi_miller_loop(&[(&pk, &h), (&neg_g1, &sig)]).final_exponentiation();
        assert!(bool::from(result.is_identity()));
    }

    #[test]
    fn gt_group_laws() {
        let g = Gt::GENERATOR;
        let r_minus_one = -Fr::ONE;
        assert_eq!(g * r_minus_one + g, Gt::IDENTITY);
        assert_eq!(g.double(), g + g);
        assert_eq!(g - g, Gt::IDENTITY);
        assert_eq!(g * Fr::ZERO, Gt::IDENTITY);
        assert_eq!(g.to_fp12() * (-g).to_fp12(), Fp12::ONE);
    }
}
