//! Elements of the Banderwagon group.

use crate::{AffinePoint, BandersnatchParams, Error, ExtendedPoint, Fq, Fr, Result};
use core::{
    borrow::Borrow,
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use edwards::EdwardsParams;
use ff::Field;
use group::Group;
use primefield::bigint::U256;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

#[cfg(feature = "alloc")]
use {
    alloc::{vec, vec::Vec},
    group::Curve,
    primefield::CanonicalLimbs,
    scalarmul::Vartime,
};

/// Element of the Banderwagon group.
///
/// Represented by a Bandersnatch point `P` of the order `2r` subgroup, where `P` and
/// `P + (0, -1) = (-x, -y)` denote the same element.
#[derive(Clone, Copy, Debug)]
pub struct Element(ExtendedPoint);

impl Element {
    /// The identity element, represented by `(0, 1)`.
    pub const IDENTITY: Self = Self(ExtendedPoint::IDENTITY);

    /// The Bandersnatch generator.
    pub fn generator() -> Self {
        Self(ExtendedPoint::generator())
    }

    /// Decode an element from 32 big-endian bytes holding `x * sign(y)`.
    ///
    /// # Errors
    ///
    /// - [`Error::CoordinateGreaterThanOrEqualModulus`] if `x >= q`.
    /// - [`Error::PointNotInSubgroup`] if `1 - a*x^2` is not a non-zero square, which is the
    ///   case for every point outside the order `2r` subgroup.
    /// - [`Error::PointNotOnCurve`] if no curve point has this x-coordinate.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let x = Option::<Fq>::from(Fq::from_uint(&U256::from_be_slice(bytes)))
            .ok_or(Error::CoordinateGreaterThanOrEqualModulus)?;

        let num = Fq::ONE - BandersnatchParams::EQUATION_A * x.square();
        if num.legendre() != 1 {
            return Err(Error::PointNotInSubgroup);
        }

        let point = Option::<AffinePoint>::from(AffinePoint::from_x(x))
            .ok_or(Error::PointNotOnCurve)?;

        // Serialization keeps the representative whose y-coordinate is the larger root.
        let y = point.y();
        let y = Fq::conditional_select(&-y, &y, y.lexicographically_largest());
        Ok(Self(AffinePoint::new_unchecked(x, y).to_extended()))
    }

    /// [`Element::from_bytes`] for a slice, which must be 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = <&[u8; 32]>::try_from(bytes).map_err(|_| Error::InvalidEncoding)?;
        Self::from_bytes(bytes)
    }

    /// Encode this element as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        encode(&self.0.to_affine())
    }

    /// Encode several elements with a single field inversion.
    #[cfg(feature = "alloc")]
    pub fn batch_to_bytes(elements: &[Self]) -> Vec<[u8; 32]> {
        let points: Vec<ExtendedPoint> = elements.iter().map(|e| e.0).collect();
        let mut affine = vec![AffinePoint::IDENTITY; points.len()];
        ExtendedPoint::batch_normalize(&points, &mut affine);
        affine.iter().map(encode).collect()
    }

    /// The Bandersnatch point representing this element.
    pub fn to_extended(&self) -> ExtendedPoint {
        self.0
    }

    /// Is this the identity? True for both `(0, 1)` and `(0, -1)`.
    pub fn is_identity(&self) -> Choice {
        self.0.to_coordinates().0.is_zero()
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        Self(ExtendedPoint::double(&self.0))
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self(ExtendedPoint::neg(&self.0))
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Self(ExtendedPoint::add(&self.0, &other.0))
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self(ExtendedPoint::sub(&self.0, &other.0))
    }

    /// Returns `[k] self` in constant time.
    pub fn mul(&self, k: &Fr) -> Self {
        Self(ExtendedPoint::mul(&self.0, k))
    }

    /// Returns `[k] self` for a public scalar.
    #[cfg(feature = "alloc")]
    pub fn mul_vartime(&self, k: Vartime<&Fr>) -> Self {
        let limbs = k.into_inner().canonical_limbs();
        Self(self.0.mul_vartime(Vartime::new(limbs.as_ref())))
    }

    /// `sum([k_i] E_i)` for public scalars with Pippenger's bucket method.
    ///
    /// # Panics
    ///
    /// If `elements` and `scalars` differ in length.
    #[cfg(feature = "alloc")]
    pub fn msm_vartime(elements: &[Self], scalars: &[Fr]) -> Self {
        let (affine, scalars) = msm_inputs(elements, scalars);
        Self(scalarmul::msm_vartime::<ExtendedPoint, _, _>(
            &affine,
            Vartime::new(scalars.as_slice()),
        ))
    }

    /// [`Element::msm_vartime`] spread over the rayon thread pool.
    ///
    /// # Panics
    ///
    /// If `elements` and `scalars` differ in length.
    #[cfg(feature = "parallel")]
    pub fn msm_parallel_vartime(elements: &[Self], scalars: &[Fr]) -> Self {
        let (affine, scalars) = msm_inputs(elements, scalars);
        Self(scalarmul::msm_parallel_vartime::<ExtendedPoint, _, _>(
            &affine,
            Vartime::new(scalars.as_slice()),
        ))
    }
}

/// `x`, negated unless `y` is the lexicographically largest root.
fn encode(point: &AffinePoint) -> [u8; 32] {
    let x = point.x();
    let x = Fq::conditional_select(&-x, &x, point.y().lexicographically_largest());
    let mut out = [0u8; 32];
    x.to_canonical().write_be_bytes(&mut out);
    out
}

#[cfg(feature = "alloc")]
fn msm_inputs(elements: &[Element], scalars: &[Fr]) -> (Vec<AffinePoint>, Vec<U256>) {
    assert_eq!(elements.len(), scalars.len());
    let points: Vec<ExtendedPoint> = elements.iter().map(|e| e.0).collect();
    let mut affine = vec![AffinePoint::IDENTITY; points.len()];
    ExtendedPoint::batch_normalize(&points, &mut affine);
    (affine, scalars.iter().map(|k| k.to_canonical()).collect())
}

impl ConditionallySelectable for Element {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ExtendedPoint::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Element {
    /// `x1 * y2 == x2 * y1`, which also identifies `(x, y)` with `(-x, -y)`.
    fn ct_eq(&self, other: &Self) -> Choice {
        let (x1, y1, _) = self.0.to_coordinates();
        let (x2, y2, _) = other.0.to_coordinates();
        (x1 * y2).ct_eq(&(x2 * y1))
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DefaultIsZeroes for Element {}

impl Eq for Element {}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

macro_rules! impl_element_binary {
    ($op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $method:ident) => {
        impl $op<Element> for Element {
            type Output = Element;

            fn $op_fn(self, rhs: Element) -> Element {
                Element::$method(&self, &rhs)
            }
        }

        impl $op<&Element> for Element {
            type Output = Element;

            fn $op_fn(self, rhs: &Element) -> Element {
                Element::$method(&self, rhs)
            }
        }

        impl $op<&Element> for &Element {
            type Output = Element;

            fn $op_fn(self, rhs: &Element) -> Element {
                Element::$method(self, rhs)
            }
        }

        impl $assign<Element> for Element {
            fn $assign_fn(&mut self, rhs: Element) {
                *self = Element::$method(self, &rhs);
            }
        }

        impl $assign<&Element> for Element {
            fn $assign_fn(&mut self, rhs: &Element) {
                *self = Element::$method(self, rhs);
            }
        }
    };
}

impl_element_binary!(Add, add, AddAssign, add_assign, add);
impl_element_binary!(Sub, sub, SubAssign, sub_assign, sub);

impl Neg for Element {
    type Output = Element;

    fn neg(self) -> Element {
        Element::neg(&self)
    }
}

impl Neg for &Element {
    type Output = Element;

    fn neg(self) -> Element {
        Element::neg(self)
    }
}

impl<S: Borrow<Fr>> Mul<S> for Element {
    type Output = Element;

    fn mul(self, k: S) -> Element {
        Element::mul(&self, k.borrow())
    }
}

impl<S: Borrow<Fr>> Mul<S> for &Element {
    type Output = Element;

    fn mul(self, k: S) -> Element {
        Element::mul(self, k.borrow())
    }
}

impl<S: Borrow<Fr>> MulAssign<S> for Element {
    fn mul_assign(&mut self, k: S) {
        *self = Element::mul(self, k.borrow());
    }
}

impl Sum for Element {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |a, b| a + b)
    }
}

impl<'a> Sum<&'a Element> for Element {
    fn sum<I: Iterator<Item = &'a Element>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |a, b| a + b)
    }
}

impl Group for Element {
    type Scalar = Fr;

    fn random(mut rng: impl RngCore) -> Self {
        Self::generator() * Fr::random(&mut rng)
    }

    fn identity() -> Self {
        Self::IDENTITY
    }

    fn generator() -> Self {
        Element::generator()
    }

    fn is_identity(&self) -> Choice {
        Element::is_identity(self)
    }

    fn double(&self) -> Self {
        Element::double(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Element;
    use crate::{AffinePoint, Error, ExtendedPoint, Fq, Fr};
    use ff::Field;
    use group::Group;
    use hex_literal::hex;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    /// Encodings of `[k]G`.
    const VECTORS: [(u64, [u8; 32]); 6] = [
        (1, hex!("4a2c7486fd924882bf02c6908de395122843e3e05264d7991e18e7985dad51e9")),
        (2, hex!("43aa74ef706605705989e8fd38df46873b7eae5921fbed115ac9d937399ce4d5")),
        (3, hex!("49730da2a2931b0402ee45d704997e8e33d462382e41ad209aa2dd869de5cb9b")),
        (4, hex!("5e5f550494159f38aa54d2ed7f11a7e93e4968617990445cc93ac8e59808c126")),
        (5, hex!("68cbece0b8fb55450410cbc058928a567eed293d168faef44bfde25f943aabe0")),
        (16, hex!("14ddaa48820cb6523b9ae5fe9fe257cbbd1f3d598a28e670a40da5d1159d864a")),
    ];

    fn be_bytes(x: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&x.to_be_bytes());
        out
    }

    #[test]
    fn generator_multiples_match_vectors() {
        let g = Element::generator();
        for (k, bytes) in VECTORS {
            let p = g * Fr::from(k);
            assert_eq!(p.to_bytes(), bytes, "k = {k}");
            assert_eq!(Element::from_bytes(&bytes), Ok(p), "k = {k}");
        }

        let mut acc = Element::IDENTITY;
        for k in 1..=5 {
            acc += g;
            assert_eq!(acc.to_bytes(), VECTORS[k - 1].1);
        }
    }

    #[test]
    fn identity_encoding() {
        assert_eq!(Element::IDENTITY.to_bytes(), [0; 32]);
        assert_eq!(Element::from_bytes(&[0; 32]), Ok(Element::IDENTITY));
        assert!(bool::from(Element::from_bytes(&[0; 32]).unwrap().is_identity()));
    }

    #[test]
    fn two_torsion_offset_is_the_same_element() {
        let torsion = AffinePoint::new(Fq::ZERO, -Fq::ONE).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..8 {
            let p = Element::random(&mut rng);
            let q = Element(&p.0 + &torsion.to_extended());
            assert_ne!(p.0, q.0);
            assert_eq!(p, q);
            assert_eq!(p.to_bytes(), q.to_bytes());
            assert_ne!(p, -p);
        }
        assert!(bool::from(Element(torsion.to_extended()).is_identity()));
    }

    #[test]
    fn serialization_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..16 {
            let p = Element::random(&mut rng);
            let bytes = p.to_bytes();
            let decoded = Element::from_bytes(&bytes).unwrap();
            assert_eq!(decoded, p);
            assert_eq!(decoded.to_bytes(), bytes);
            assert_eq!(Element::from_slice(&bytes), Ok(p));
        }
    }

    #[test]
    fn rejects_invalid_encodings() {
        let q = hex!("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001");
        assert_eq!(
            Element::from_bytes(&q),
            Err(Error::CoordinateGreaterThanOrEqualModulus)
        );
        assert_eq!(
            Element::from_bytes(&[0xff; 32]),
            Err(Error::CoordinateGreaterThanOrEqualModulus)
        );

        // x = 7 is on the curve, but 1 - a*x^2 is not a square.
        assert!(bool::from(AffinePoint::from_x(Fq::from(7u64)).is_some()));
        assert_eq!(Element::from_bytes(&be_bytes(7)), Err(Error::PointNotInSubgroup));
        assert_eq!(Element::from_bytes(&be_bytes(2)), Err(Error::PointNotInSubgroup));

        // x = 4 passes the square test but has no y.
        assert_eq!(Element::from_bytes(&be_bytes(4)), Err(Error::PointNotOnCurve));

        assert!(Element::from_bytes(&be_bytes(1)).is_ok());
        assert_eq!(Element::from_slice(&[0; 31]), Err(Error::InvalidEncoding));
        assert_eq!(Element::from_slice(&[0; 33]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn group_order_annihilates() {
        let g = Element::generator();
        assert_eq!(g * -Fr::ONE + g, Element::IDENTITY);
        assert_eq!(g.double(), g + g);
        assert_eq!(g - g, Element::IDENTITY);
        assert!(bool::from((g - g).is_identity()));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn batch_serialization_matches_single() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let elements: [Element; 9] = core::array::from_fn(|i| match i {
            0 => Element::IDENTITY,
            _ => Element::random(&mut rng),
        });
        let encoded = Element::batch_to_bytes(&elements);
        assert_eq!(encoded.len(), elements.len());
        for (element, bytes) in elements.iter().zip(&encoded) {
            assert_eq!(&element.to_bytes(), bytes);
        }
        assert!(Element::batch_to_bytes(&[]).is_empty());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn scalar_multiplication_agrees() {
        use scalarmul::Vartime;

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..8 {
            let p = Element::random(&mut rng);
            let k = Fr::random(&mut rng);
            let expected = p * k;
            assert_eq!(p.mul_vartime(Vartime::new(&k)), expected);
            assert_eq!(scalarmul::mul_double_and_add(&p, &k), expected);
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn msm_matches_naive() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for n in [0usize, 1, 7, 64] {
            let elements: [Element; 64] = core::array::from_fn(|_| Element::random(&mut rng));
            let scalars: [Fr; 64] = core::array::from_fn(|_| Fr::random(&mut rng));
            let (elements, scalars) = (&elements[..n], &scalars[..n]);

            let expected: Element = elements.iter().zip(scalars).map(|(e, k)| e * k).sum();
            assert_eq!(Element::msm_vartime(elements, scalars), expected, "n = {n}");
        }
    }

    #[test]
    fn extended_point_is_exposed() {
        let g = Element::generator();
        assert_eq!(g.to_extended(), ExtendedPoint::generator());
    }
}
