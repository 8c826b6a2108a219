//! Scalar field `Fr`, the order of the pairing groups.

use crate::{Error, Result};
use digest::{Digest, FixedOutputReset, core_api::BlockSizeUser};
use primefield::{ByteOrder, MontyFieldElement, bigint::U256, monty_field_params};
use rand_core::RngCore;

monty_field_params!(
    name: FrParams,
    modulus: "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
    uint: U256,
    byte_order: ByteOrder::LittleEndian,
    multiplicative_generator: 7,
    doc: "BLS12-381 scalar field modulus"
);

/// Element of the 255-bit scalar field.
///
/// The [`ff::PrimeField`] representation is little-endian, as in the Zcash encoding;
/// [`ScalarExt`] adds the big-endian codecs used by signature schemes.
pub type Fr = MontyFieldElement<FrParams, { U256::LIMBS }>;

/// Boundary operations on scalars.
pub trait ScalarExt: Sized {
    /// Decode 32 big-endian bytes, rejecting zero and values `>= r`.
    fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self>;

    /// Encode as 32 big-endian bytes.
    fn to_be_bytes(&self) -> [u8; 32];

    /// Sample a uniformly random non-zero scalar by rejection sampling.
    ///
    /// Failures of the generator are reported as [`Error::RandomnessFailure`].
    fn try_random_nonzero<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self>;

    /// Deterministic nonce for the secret key `self` and message digest `hash`, as described in
    /// RFC 6979 section 3.2, with optional additional `data` (section 3.6).
    ///
    /// `r` is 255 bits long, so both the digest and every DRBG output are truncated to their
    /// leftmost 255 bits (`bits2int`) before use.
    fn generate_k<D>(&self, hash: &[u8], data: &[u8]) -> Self
    where
        D: Digest + BlockSizeUser + FixedOutputReset;
}

impl ScalarExt for Fr {
    fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let uint = U256::from_be_slice(bytes);
        let scalar =
            Option::<Fr>::from(Fr::from_uint(&uint)).ok_or(Error::ScalarLargerThanCurveOrder)?;

        if bool::from(scalar.is_zero()) {
            return Err(Error::ScalarZero);
        }

        Ok(scalar)
    }

    fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.to_canonical().write_be_bytes(&mut out);
        out
    }

    fn try_random_nonzero<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        loop {
            let scalar = Fr::try_random(rng).map_err(|_| Error::RandomnessFailure)?;
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }

    fn generate_k<D>(&self, hash: &[u8], data: &[u8]) -> Self
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        let x = self.to_be_bytes();
        // bits2octets: bits2int(h) < 2^255 < 2r, so one reduction suffices.
        let h = Fr::from_uint_reduced(&bits2int(hash)).to_be_bytes();
        let mut drbg = rfc6979::HmacDrbg::<D>::new(&x, &h, data);

        loop {
            let mut t = [0u8; 32];
            drbg.fill_bytes(&mut t);
            let k = Option::<Fr>::from(Fr::from_uint(&bits2int(&t)));
            if let Some(k) = k.filter(|k| !bool::from(k.is_zero())) {
                return k;
            }
        }
    }
}

/// `bits2int` of RFC 6979 section 2.3.2 for the 255-bit order: the leftmost 255 bits of
/// `bytes` as a big-endian integer.
fn bits2int(bytes: &[u8]) -> U256 {
    if bytes.len() < U256::BYTES {
        U256::from_be_slice(bytes)
    } else {
        U256::from_be_slice(&bytes[..U256::BYTES]).shr1().0
    }
}

/// Little-endian limbs of `r`.
pub(crate) const ORDER: [u64; 4] = {
    use primefield::MontyFieldParams;
    <FrParams as MontyFieldParams<{ U256::LIMBS }>>::PARAMS
        .modulus()
        .to_words()
};

#[cfg(test)]
mod tests {
    use super::{Fr, ScalarExt, bits2int};
    use crate::Error;
    use core::num::NonZeroU32;
    use ff::Field;
    use primefield::bigint::U256;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
    use rand_core::{CryptoRng, RngCore};
    use sha2::{Digest, Sha256, Sha512};

    primefield::test_primefield!(Fr, U256);

    /// Generator that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(NonZeroU32::new(rand_core::Error::CUSTOM_START)
                .unwrap()
                .into())
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn be_bytes_codec() {
        let one = Fr::from_be_bytes(&{
            let mut b = [0u8; 32];
            b[31] = 1;
            b
        })
        .unwrap();
        assert_eq!(one, Fr::ONE);

        let minus_one = -Fr::ONE;
        assert_eq!(Fr::from_be_bytes(&minus_one.to_be_bytes()), Ok(minus_one));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let x = Fr::random(&mut rng);
        assert_eq!(Fr::from_be_bytes(&x.to_be_bytes()), Ok(x));
    }

    #[test]
    fn be_bytes_rejects_zero_and_unreduced() {
        assert_eq!(Fr::from_be_bytes(&[0; 32]), Err(Error::ScalarZero));
        assert_eq!(Fr::from_be_bytes(&[0xff; 32]), Err(Error::ScalarLargerThanCurveOrder));

        let mut r = [0u8; 32];
        U256::from_words(super::ORDER).write_be_bytes(&mut r);
        assert_eq!(Fr::from_be_bytes(&r), Err(Error::ScalarLargerThanCurveOrder));
    }

    #[test]
    fn random_nonzero() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..16 {
            let k = Fr::try_random_nonzero(&mut rng).unwrap();
            assert!(!bool::from(k.is_zero()));
        }
        assert_eq!(
            Fr::try_random_nonzero(&mut BrokenRng),
            Err(Error::RandomnessFailure)
        );
    }

    #[test]
    fn generate_k_is_deterministic() {
        let x = Fr::from(0x1234_5678u64);
        let h = [0x5au8; 32];
        let k = x.generate_k::<Sha256>(&h, &[]);
        assert_eq!(k, x.generate_k::<Sha256>(&h, &[]));
        assert!(!bool::from(k.is_zero()));

        assert_ne!(k, x.generate_k::<Sha256>(&h, b"extra"));
        assert_ne!(k, (x + Fr::ONE).generate_k::<Sha256>(&h, &[]));
        assert_ne!(k, x.generate_k::<Sha256>(&[0xa5; 32], &[]));
    }

    #[test]
    fn bits2int_keeps_the_leftmost_255_bits() {
        let mut bytes = [0u8; 40];
        bytes[0] = 0x80;
        bytes[31] = 0x03;
        bytes[39] = 0xff;
        let mut expected = [0u8; 32];
        expected[0] = 0x40;
        expected[31] = 0x01;
        assert_eq!(bits2int(&bytes), U256::from_be_slice(&expected));
        assert_eq!(bits2int(&bytes[..32]), U256::from_be_slice(&expected));

        // Shorter than the order: taken as is.
        assert_eq!(bits2int(&[0x01, 0x02]), U256::from_u64(0x0102));
        assert_eq!(bits2int(&[]), U256::ZERO);
    }

    #[test]
    fn generate_k_known_answers() {
        let sample = Sha256::digest(b"sample");
        let x = Fr::from(0x1234_5678u64);
        assert_eq!(
            x.generate_k::<Sha256>(&sample, &[]),
            Fr::from_hex_vartime("452f94cbc86c46ea7696acb5433ad804fb159e0ab1a7f7e6b3eeabc6413fc947")
        );
        assert_eq!(
            x.generate_k::<Sha256>(&sample, b"extra"),
            Fr::from_hex_vartime("6064e8cd82bcaecf9c81aacb39dc03dfb661c577d96f7e0b9f7ab73df1988191")
        );

        // The first DRBG output exceeds `r` after truncation and is discarded.
        assert_eq!(
            Fr::from(5u64).generate_k::<Sha256>(&sample, &[]),
            Fr::from_hex_vartime("45b092ffba4da6cedb010bd95a4be8fb5f292da6609cff8a62d57b20d8c2df11")
        );

        // A 512-bit digest and a 512-bit HMAC.
        let x = Fr::from_hex_vartime(
            "0c1b6a2b1ab3e8e5b6b0a3e5b5c6b7d8e9f0a1b2c3d4e5f60718293a4b5c6d7e",
        );
        assert_eq!(
            x.generate_k::<Sha512>(&Sha512::digest(b"sample"), &[]),
            Fr::from_hex_vartime("29e38ae3aa13f259cad59402660866955c3628a19724a0f2de10cdcea9c14893")
        );
    }
}
