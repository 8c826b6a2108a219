//! Point encodings in the Zcash format.
//!
//! Coordinates are big-endian; `Fp2` elements are written `c1 || c0`. The three most
//! significant bits of the first byte are flags:
//!
//! - `0x80`: compressed encoding
//! - `0x40`: point at infinity
//! - `0x20`: in compressed encodings, `y` is the lexicographically largest root

use crate::{
    Error, Result,
    fp::Fp,
    fp2::{self, Fp2},
    g1::{G1Affine, G1Params},
    g2::{G2Affine, G2Params},
    subgroup::Subgroup,
};
use primefield::FieldBytes;
use subtle::{Choice, ConditionallySelectable};
use weierstrass::{AffinePoint, CurveParams, ProjectivePoint};

const COMPRESSION_FLAG: u8 = 0x80;
const INFINITY_FLAG: u8 = 0x40;
const SORT_FLAG: u8 = 0x20;
const FLAGS_MASK: u8 = COMPRESSION_FLAG | INFINITY_FLAG | SORT_FLAG;

/// Serialization of the pairing group elements.
pub trait PointEncoding: Sized {
    /// Compressed encoding: the x-coordinate and the flag bits.
    type Compressed: Copy + AsRef<[u8]> + AsMut<[u8]>;

    /// Uncompressed encoding: both coordinates and the flag bits.
    type Uncompressed: Copy + AsRef<[u8]> + AsMut<[u8]>;

    /// Serialize in compressed form.
    fn to_compressed(&self) -> Self::Compressed;

    /// Serialize in uncompressed form.
    fn to_uncompressed(&self) -> Self::Uncompressed;

    /// Deserialize a compressed point, checking subgroup membership.
    fn from_compressed(bytes: &Self::Compressed) -> Result<Self>;

    /// Deserialize a compressed point on the curve, which may lie outside the prime order
    /// subgroup.
    fn from_compressed_unchecked(bytes: &Self::Compressed) -> Result<Self>;

    /// Deserialize an uncompressed point, checking subgroup membership.
    fn from_uncompressed(bytes: &Self::Uncompressed) -> Result<Self>;

    /// Deserialize an uncompressed point on the curve, which may lie outside the prime order
    /// subgroup.
    fn from_uncompressed_unchecked(bytes: &Self::Uncompressed) -> Result<Self>;
}

/// Field elements usable as point coordinates.
trait Coordinate: Copy + ConditionallySelectable {
    const SIZE: usize;

    fn write(&self, out: &mut [u8]);

    fn read(bytes: &[u8]) -> Result<Self>;

    fn lexicographically_largest(&self) -> Choice;
}

impl Coordinate for Fp {
    const SIZE: usize = 48;

    fn write(&self, out: &mut [u8]) {
        out.copy_from_slice(self.to_bytes().as_ref());
    }

    fn read(bytes: &[u8]) -> Result<Self> {
        let repr = FieldBytes::from_slice(bytes).ok_or(Error::InvalidEncoding)?;
        Option::from(Fp::from_bytes(&repr)).ok_or(Error::CoordinateGreaterThanOrEqualModulus)
    }

    fn lexicographically_largest(&self) -> Choice {
        Fp::lexicographically_largest(self)
    }
}

impl Coordinate for Fp2 {
    const SIZE: usize = 96;

    fn write(&self, out: &mut [u8]) {
        let (c1, c0) = out.split_at_mut(Fp::SIZE);
        self.c1.write(c1);
        self.c0.write(c0);
    }

    fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::SIZE {
            return Err(Error::InvalidEncoding);
        }
        let (c1, c0) = bytes.split_at(Fp::SIZE);
        Ok(Fp2::new(Fp::read(c0)?, Fp::read(c1)?))
    }

    fn lexicographically_largest(&self) -> Choice {
        fp2::lexicographically_largest(self)
    }
}

fn write_compressed<C>(point: &AffinePoint<C>, out: &mut [u8])
where
    C: CurveParams<FieldElement: Coordinate>,
{
    // The identity has zero coordinates.
    point.x().write(out);

    let identity = point.is_identity();
    let sort = point.y().lexicographically_largest() & !identity;
    out[0] |= COMPRESSION_FLAG;
    out[0] |= u8::conditional_select(&0, &INFINITY_FLAG, identity);
    out[0] |= u8::conditional_select(&0, &SORT_FLAG, sort);
}

fn write_uncompressed<C>(point: &AffinePoint<C>, out: &mut [u8])
where
    C: CurveParams<FieldElement: Coordinate>,
{
    let (x, y) = out.split_at_mut(C::FieldElement::SIZE);
    point.x().write(x);
    point.y().write(y);
    out[0] |= u8::conditional_select(&0, &INFINITY_FLAG, point.is_identity());
}

/// Strip the flag bits, returning them together with the remaining payload.
fn split_flags<const N: usize>(bytes: &[u8; N]) -> (u8, [u8; N]) {
    let mut payload = *bytes;
    payload[0] &= !FLAGS_MASK;
    (bytes[0] & FLAGS_MASK, payload)
}

/// The identity if the infinity flag is set and nothing else is; `None` if it is not set.
fn read_identity<C: CurveParams>(flags: u8, payload: &[u8]) -> Result<Option<AffinePoint<C>>> {
    if flags & INFINITY_FLAG == 0 {
        return Ok(None);
    }
    if flags & SORT_FLAG != 0 || payload.iter().any(|&b| b != 0) {
        return Err(Error::InvalidEncoding);
    }
    Ok(Some(AffinePoint::IDENTITY))
}

fn read_compressed<C, const N: usize>(bytes: &[u8; N]) -> Result<AffinePoint<C>>
where
    C: CurveParams<FieldElement: Coordinate>,
{
    let (flags, payload) = split_flags(bytes);
    if flags & COMPRESSION_FLAG == 0 {
        return Err(Error::InvalidEncoding);
    }
    if let Some(identity) = read_identity(flags, &payload)? {
        return Ok(identity);
    }

    let x = C::FieldElement::read(&payload)?;
    let mut point = Option::<AffinePoint<C>>::from(AffinePoint::from_x(x))
        .ok_or(Error::PointNotOnCurve)?;
    let sort = Choice::from(u8::from(flags & SORT_FLAG != 0));
    point.conditional_negate(point.y().lexicographically_largest() ^ sort);
    Ok(point)
}

fn read_uncompressed<C, const N: usize>(bytes: &[u8; N]) -> Result<AffinePoint<C>>
where
    C: CurveParams<FieldElement: Coordinate>,
{
    let (flags, payload) = split_flags(bytes);
    if flags & (COMPRESSION_FLAG | SORT_FLAG) != 0 {
        return Err(Error::InvalidEncoding);
    }
    if let Some(identity) = read_identity(flags, &payload)? {
        return Ok(identity);
    }

    let (x, y) = payload.split_at(C::FieldElement::SIZE);
    let x = C::FieldElement::read(x)?;
    let y = C::FieldElement::read(y)?;
    Option::from(AffinePoint::new(x, y)).ok_or(Error::PointNotOnCurve)
}

macro_rules! impl_point_encoding {
    ($affine:ty, $params:ty, $compressed:expr, $uncompressed:expr) => {
        impl PointEncoding for $affine {
            type Compressed = [u8; $compressed];
            type Uncompressed = [u8; $uncompressed];

            fn to_compressed(&self) -> Self::Compressed {
                let mut out = [0; $compressed];
                write_compressed(self, &mut out);
                out
            }

            fn to_uncompressed(&self) -> Self::Uncompressed {
                let mut out = [0; $uncompressed];
                write_uncompressed(self, &mut out);
                out
            }

            fn from_compressed(bytes: &Self::Compressed) -> Result<Self> {
                Self::from_compressed_unchecked(bytes).and_then(check_subgroup)
            }

            fn from_compressed_unchecked(bytes: &Self::Compressed) -> Result<Self> {
                read_compressed::<$params, $compressed>(bytes)
            }

            fn from_uncompressed(bytes: &Self::Uncompressed) -> Result<Self> {
                Self::from_uncompressed_unchecked(bytes).and_then(check_subgroup)
            }

            fn from_uncompressed_unchecked(bytes: &Self::Uncompressed) -> Result<Self> {
                read_uncompressed::<$params, $uncompressed>(bytes)
            }
        }
    };
}

impl_point_encoding!(G1Affine, G1Params, 48, 96);
impl_point_encoding!(G2Affine, G2Params, 96, 192);

fn check_subgroup<C>(point: AffinePoint<C>) -> Result<AffinePoint<C>>
where
    C: CurveParams,
    ProjectivePoint<C>: Subgroup,
{
    if bool::from(point.to_projective().is_torsion_free()) {
        Ok(point)
    } else {
        Err(Error::PointNotInSubgroup)
    }
}

#[cfg(test)]
mod tests {
    use super::PointEncoding;
    use crate::{Error, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
    use hex_literal::hex;

    const G1_COMPRESSED: [u8; 48] = hex!(
        "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
    );
    const G1_UNCOMPRESSED: [u8; 96] = hex!(
        "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
        "08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"
    );
    const G1_TIMES_5_COMPRESSED: [u8; 48] = hex!(
        "b0e7791fb972fe014159aa33a98622da3cdc98ff707965e536d8636b5fcc5ac7a91a8c46e59a00dca575af0f18fb13dc"
    );
    const G2_COMPRESSED: [u8; 96] = hex!(
        "93e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e"
        "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
    );
    const G2_UNCOMPRESSED: [u8; 192] = hex!(
        "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e"
        "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8"
        "0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be"
        "0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801"
    );
    const G2_TIMES_5_COMPRESSED: [u8; 96] = hex!(
        "80fb837804dba8213329db46608b6c121d973363c1234a86dd183baff112709cf97096c5e9a1a770ee9d7dc641a894d6"
        "0411a5de6730ffece671a9f21d65028cc0f1102378de124562cb1ff49db6f004fcd14d683024b0548eff3d1468df2688"
    );

    /// The base field modulus, big-endian.
    const P: [u8; 48] = hex!(
        "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab"
    );

    fn compressed_x<const N: usize>(x: u8) -> [u8; N] {
        let mut bytes = [0; N];
        bytes[0] = 0x80;
        bytes[N - 1] = x;
        bytes
    }

    #[test]
    fn g1_vectors() {
        let g = G1Affine::GENERATOR;
        assert_eq!(g.to_compressed(), G1_COMPRESSED);
        assert_eq!(g.to_uncompressed(), G1_UNCOMPRESSED);
        assert_eq!(G1Affine::from_compressed(&G1_COMPRESSED), Ok(g));
        assert_eq!(G1Affine::from_uncompressed(&G1_UNCOMPRESSED), Ok(g));

        let p = (G1Projective::GENERATOR * Fr::from(5u64)).to_affine();
        assert_eq!(p.to_compressed(), G1_TIMES_5_COMPRESSED);
        assert_eq!(G1Affine::from_compressed(&G1_TIMES_5_COMPRESSED), Ok(p));
        assert_eq!(G1Affine::from_uncompressed(&p.to_uncompressed()), Ok(p));

        let n = -p;
        assert_eq!(G1Affine::from_compressed(&n.to_compressed()), Ok(n));
        assert_ne!(n.to_compressed(), p.to_compressed());
    }

    #[test]
    fn g2_vectors() {
        let g = G2Affine::GENERATOR;
        assert_eq!(g.to_compressed(), G2_COMPRESSED);
        assert_eq!(g.to_uncompressed(), G2_UNCOMPRESSED);
        assert_eq!(G2Affine::from_compressed(&G2_COMPRESSED), Ok(g));
        assert_eq!(G2Affine::from_uncompressed(&G2_UNCOMPRESSED), Ok(g));

        let p = (G2Projective::GENERATOR * Fr::from(5u64)).to_affine();
        assert_eq!(p.to_compressed(), G2_TIMES_5_COMPRESSED);
        assert_eq!(G2Affine::from_compressed(&G2_TIMES_5_COMPRESSED), Ok(p));

        let n = -p;
        assert_eq!(G2Affine::from_compressed(&n.to_compressed()), Ok(n));
        assert_eq!(G2Affine::from_uncompressed(&n.to_uncompressed()), Ok(n));
    }

    #[test]
    fn identity() {
        let mut compressed = [0u8; 48];
        compressed[0] = 0xc0;
        let mut uncompressed = [0u8; 96];
        uncompressed[0] = 0x40;

        assert_eq!(G1Affine::IDENTITY.to_compressed(), compressed);
        assert_eq!(G1Affine::IDENTITY.to_uncompressed(), uncompressed);
        assert_eq!(G1Affine::from_compressed(&compressed), Ok(G1Affine::IDENTITY));
        assert_eq!(G1Affine::from_uncompressed(&uncompressed), Ok(G1Affine::IDENTITY));

        let id = G2Affine::IDENTITY;
        assert_eq!(G2Affine::from_compressed(&id.to_compressed()), Ok(id));
        assert_eq!(G2Affine::from_uncompressed(&id.to_uncompressed()), Ok(id));
        assert_eq!(id.to_compressed()[0], 0xc0);
        assert!(id.to_compressed()[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn malformed_flags() {
        let mut no_compression = G1_COMPRESSED;
        no_compression[0] &= 0x7f;
        assert_eq!(G1Affine::from_compressed(&no_compression), Err(Error::InvalidEncoding));

        let mut compressed_flag = G1_UNCOMPRESSED;
        compressed_flag[0] |= 0x80;
        assert_eq!(G1Affine::from_uncompressed(&compressed_flag), Err(Error::InvalidEncoding));

        let mut sorted_infinity = [0u8; 48];
        sorted_infinity[0] = 0xe0;
        assert_eq!(G1Affine::from_compressed(&sorted_infinity), Err(Error::InvalidEncoding));

        let mut infinity_with_payload = [0u8; 96];
        infinity_with_payload[0] = 0xc0;
        infinity_with_payload[95] = 1;
        assert_eq!(G2Affine::from_compressed(&infinity_with_payload), Err(Error::InvalidEncoding));
    }

    #[test]
    fn unreduced_coordinate() {
        let mut bytes = P;
        bytes[0] |= 0x80;
        assert_eq!(
            G1Affine::from_compressed(&bytes),
            Err(Error::CoordinateGreaterThanOrEqualModulus)
        );

        let mut bytes = G1_UNCOMPRESSED;
        bytes[48..].copy_from_slice(&P);
        assert_eq!(
            G1Affine::from_uncompressed(&bytes),
            Err(Error::CoordinateGreaterThanOrEqualModulus)
        );
    }

    #[test]
    fn off_curve_and_outside_subgroup() {
        // x = 0 is on E(Fp) but the point has order 3.
        let x0 = compressed_x::<48>(0);
        assert_eq!(G1Affine::from_compressed(&x0), Err(Error::PointNotInSubgroup));
        let point = G1Affine::from_compressed_unchecked(&x0).unwrap();
        assert_eq!(point.x(), crate::Fp::ZERO);
        let uncompressed = point.to_uncompressed();
        assert_eq!(G1Affine::from_uncompressed(&uncompressed), Err(Error::PointNotInSubgroup));
        assert_eq!(G1Affine::from_uncompressed_unchecked(&uncompressed), Ok(point));

        let x1 = compressed_x::<48>(1);
        assert_eq!(G1Affine::from_compressed_unchecked(&x1), Err(Error::PointNotOnCurve));

        let mut off_curve = G1_UNCOMPRESSED;
        off_curve[95] ^= 1;
        assert_eq!(G1Affine::from_uncompressed(&off_curve), Err(Error::PointNotOnCurve));

        // x = 2 is on the twist but not in G2, x = 1 is not on the twist.
        let x2 = compressed_x::<96>(2);
        assert_eq!(G2Affine::from_compressed(&x2), Err(Error::PointNotInSubgroup));
        assert!(G2Affine::from_compressed_unchecked(&x2).is_ok());
        let x1 = compressed_x::<96>(1);
        assert_eq!(G2Affine::from_compressed(&x1), Err(Error::PointNotOnCurve));
    }
}
