//! `hash_to_field` over `expand_message_xmd` from [RFC 9380 section 5][h2f].
//!
//! Messages and domain separation tags are passed as lists of slices, which are hashed as
//! if they had been concatenated.
//!
//! [h2f]: https://www.rfc-editor.org/rfc/rfc9380.html#name-hashing-to-a-finite-field

use crate::{fp::Fp, fp2::Fp2, scalar::Fr};
use core::{fmt, num::NonZeroU16};
use digest::{Digest, Output, core_api::BlockSizeUser};

/// Salt when the DST is too long
const OVERSIZE_DST_SALT: &[u8] = b"H2C-OVERSIZE-DST-";
/// Maximum domain separation tag length
const MAX_DST_LEN: usize = 255;
/// Largest `L` of any [`FromOkm`] implementation in this crate.
const MAX_OKM_LEN: usize = 128;

/// Error returned by [`ExpandMsgXmd::expand_message`] and [`hash_to_field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandMsgXmdError {
    /// The domain separation tag is empty.
    EmptyDst,
    /// The tag is longer than 255 bytes and the hash output is too large to replace it.
    DstHash,
    /// The requested output is empty, longer than 65535 bytes or needs more than 255 blocks.
    Length,
}

impl fmt::Display for ExpandMsgXmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyDst => "the domain separation tag is empty",
            Self::DstHash => "the hash output is too large to shorten the domain separation tag",
            Self::Length => "unsupported output length",
        })
    }
}

impl core::error::Error for ExpandMsgXmdError {}

/// Field elements that can be derived from `L` uniformly random bytes.
pub trait FromOkm: Sized {
    /// `L = ceil((ceil(log2(p)) + k) / 8)` for the field modulus `p` and `k = 128`.
    const LENGTH: usize;

    /// Reduce `okm`, which is exactly [`FromOkm::LENGTH`] bytes, into a field element.
    fn from_okm(okm: &[u8]) -> Self;
}

impl FromOkm for Fp {
    const LENGTH: usize = 64;

    fn from_okm(okm: &[u8]) -> Self {
        Fp::from_be_bytes_wide(okm)
    }
}

impl FromOkm for Fr {
    const LENGTH: usize = 48;

    fn from_okm(okm: &[u8]) -> Self {
        Fr::from_be_bytes_wide(okm)
    }
}

impl FromOkm for Fp2 {
    const LENGTH: usize = 2 * Fp::LENGTH;

    fn from_okm(okm: &[u8]) -> Self {
        let (c0, c1) = okm.split_at(Fp::LENGTH);
        Fp2::new(Fp::from_okm(c0), Fp::from_okm(c1))
    }
}

/// Hash `msg` to `out.len()` field elements under the domain separation tag `dst`.
///
/// # Errors
///
/// - `dst` is empty.
/// - `dst` is longer than 255 bytes and `D` outputs more than 255 bytes.
/// - `out` is empty, or too long for a single expansion with `D`.
pub fn hash_to_field<D, T>(
    msg: &[&[u8]],
    dst: &[&[u8]],
    out: &mut [T],
) -> Result<(), ExpandMsgXmdError>
where
    D: Digest + BlockSizeUser,
    T: FromOkm,
{
    const { assert!(T::LENGTH <= MAX_OKM_LEN) };

    let len_in_bytes = T::LENGTH
        .checked_mul(out.len())
        .and_then(|len| u16::try_from(len).ok())
        .and_then(NonZeroU16::new)
        .ok_or(ExpandMsgXmdError::Length)?;

    let mut expander = ExpandMsgXmd::<D>::expand_message(msg, dst, len_in_bytes)?;
    let mut okm = [0u8; MAX_OKM_LEN];
    let okm = &mut okm[..T::LENGTH];
    for o in out.iter_mut() {
        expander.fill_bytes(okm);
        *o = T::from_okm(okm);
    }

    Ok(())
}

/// The domain separation tag
///
/// Implements [section 5.3.3 of RFC9380][dst].
///
/// [dst]: https://www.rfc-editor.org/rfc/rfc9380.html#name-using-dsts-longer-than-255-
#[derive(Debug)]
enum Domain<'a, D: Digest> {
    /// > 255
    Hashed(Output<D>),
    /// <= 255
    Array(&'a [&'a [u8]]),
}

impl<'a, D: Digest> Domain<'a, D> {
    fn xmd(dst: &'a [&'a [u8]]) -> Result<Self, ExpandMsgXmdError> {
        let len = dst.iter().map(|slice| slice.len()).sum::<usize>();
        if len == 0 {
            Err(ExpandMsgXmdError::EmptyDst)
        } else if len > MAX_DST_LEN {
            if <D as Digest>::output_size() > MAX_DST_LEN {
                return Err(ExpandMsgXmdError::DstHash);
            }
            let mut hash = D::new_with_prefix(OVERSIZE_DST_SALT);
            for slice in dst {
                hash.update(slice);
            }
            Ok(Self::Hashed(hash.finalize()))
        } else {
            Ok(Self::Array(dst))
        }
    }

    fn update_hash(&self, hash: &mut D) {
        match self {
            Self::Hashed(d) => hash.update(d),
            Self::Array(d) => {
                for d in d.iter() {
                    hash.update(d)
                }
            }
        }
    }

    /// Both variants are at most 255 bytes long after [`Domain::xmd`].
    fn len(&self) -> u8 {
        let len = match self {
            Self::Hashed(d) => d.len(),
            Self::Array(d) => d.iter().map(|d| d.len()).sum::<usize>(),
        };
        len as u8
    }
}

/// Expander state of `expand_message_xmd`: the blocks `b_1, b_2, ...` are produced lazily.
pub struct ExpandMsgXmd<'a, D: Digest> {
    b_0: Output<D>,
    b_vals: Output<D>,
    domain: Domain<'a, D>,
    index: u8,
    offset: usize,
    ell: u8,
}

impl<'a, D> ExpandMsgXmd<'a, D>
where
    D: Digest + BlockSizeUser,
{
    /// Start expanding `msg` to `len_in_bytes` bytes, which are then read with
    /// [`ExpandMsgXmd::fill_bytes`].
    ///
    /// # Errors
    ///
    /// See [`hash_to_field`].
    pub fn expand_message(
        msg: &[&[u8]],
        dst: &'a [&'a [u8]],
        len_in_bytes: NonZeroU16,
    ) -> Result<Self, ExpandMsgXmdError> {
        let b_in_bytes = <D as Digest>::output_size();
        let len_in_bytes_u16 = len_in_bytes.get();
        let ell = u8::try_from(usize::from(len_in_bytes_u16).div_ceil(b_in_bytes))
            .map_err(|_| ExpandMsgXmdError::Length)?;

        let domain = Domain::<D>::xmd(dst)?;

        let mut b_0 = D::new();
        let zeros = [0u8; 64];
        let mut pad = D::block_size();
        while pad > 0 {
            let n = pad.min(zeros.len());
            b_0.update(&zeros[..n]);
            pad -= n;
        }
        for slice in msg {
            b_0.update(slice);
        }
        b_0.update(len_in_bytes_u16.to_be_bytes());
        b_0.update([0]);
        domain.update_hash(&mut b_0);
        b_0.update([domain.len()]);
        let b_0 = b_0.finalize();

        let mut b_vals = D::new_with_prefix(&b_0[..]);
        b_vals.update([1u8]);
        domain.update_hash(&mut b_vals);
        b_vals.update([domain.len()]);
        let b_vals = b_vals.finalize();

        Ok(Self {
            b_0,
            b_vals,
            domain,
            index: 1,
            offset: 0,
            ell,
        })
    }

    /// Fill `okm` with the next expanded bytes. Bytes past `len_in_bytes` are left untouched.
    pub fn fill_bytes(&mut self, okm: &mut [u8]) {
        for b in okm {
            if self.offset == self.b_vals.len() && !self.next() {
                return;
            }
            *b = self.b_vals[self.offset];
            self.offset += 1;
        }
    }

    fn next(&mut self) -> bool {
        if self.index >= self.ell {
            return false;
        }

        self.index += 1;
        self.offset = 0;
        // b_0 XOR b_(idx - 1)
        let mut tmp = Output::<D>::default();
        for (t, (b0, bi)) in tmp.iter_mut().zip(self.b_0.iter().zip(self.b_vals.iter())) {
            *t = b0 ^ bi;
        }

        let mut b_vals = D::new_with_prefix(&tmp[..]);
        b_vals.update([self.index]);
        self.domain.update_hash(&mut b_vals);
        b_vals.update([self.domain.len()]);
        self.b_vals = b_vals.finalize();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ExpandMsgXmd, ExpandMsgXmdError, hash_to_field};
    use crate::{Fp, Fp2, Fr};
    use core::num::NonZeroU16;
    use hex_literal::hex;
    use sha2::{Sha256, Sha512};

    const DST: &[u8] = b"QUUX-V01-CS02-with-expander-SHA256-128";

    fn expand<const N: usize>(msg: &[&[u8]], dst: &[&[u8]]) -> [u8; N] {
        let len = NonZeroU16::new(N as u16).unwrap();
        let mut out = [0u8; N];
        ExpandMsgXmd::<Sha256>::expand_message(msg, dst, len)
            .unwrap()
            .fill_bytes(&mut out);
        out
    }

    fn fp(hex: &str) -> Fp {
        Fp::from_hex_vartime(hex)
    }

    #[test]
    fn expand_message_xmd_sha256() {
        assert_eq!(
            expand::<0x20>(&[b""], &[DST]),
            hex!("68a985b87eb6b46952128911f2a4412bbc302a9d759667f87f7a21d803f07235")
        );
        assert_eq!(
            expand::<0x20>(&[b"abc"], &[DST]),
            hex!("d8ccab23b5985ccea865c6c97b6e5b8350e794e603b4b97902f53a8a0d605615")
        );
        assert_eq!(
            expand::<0x80>(&[b""], &[DST]),
            hex!(
                "af84c27ccfd45d41914fdff5df25293e221afc53d8ad2ac06d5e3e29485dadbe"
                "e0d121587713a3e0dd4d5e69e93eb7cd4f5df4cd103e188cf60cb02edc3edf18"
                "eda8576c412b18ffb658e3dd6ec849469b979d444cf7b26911a08e63cf31f9dc"
                "c541708d3491184472c2c29bb749d4286b004ceb5ee6b9a7fa5b646c993f0ced"
            )
        );
    }

    #[test]
    fn split_inputs_are_concatenated() {
        let whole = expand::<0x20>(&[b"abcdef0123456789"], &[DST]);
        assert_eq!(
            whole,
            hex!("eff31487c770a893cfb36f912fbfcbff40d5661771ca4b2cb4eafe524333f5c1")
        );
        let (dst_a, dst_b) = DST.split_at(10);
        assert_eq!(
            expand::<0x20>(&[b"abc", b"", b"def0123456789"], &[dst_a, dst_b]),
            whole
        );
    }

    #[test]
    fn oversize_dst_is_hashed() {
        let dst = [b'a'; 300];
        assert_eq!(
            expand::<0x20>(&[b"msg"], &[&dst[..]]),
            hex!("cd13888f10619d6446d99fbc5ee9a3f693f2d1019eb2f18b49e06a9739cae601")
        );
    }

    #[test]
    fn invalid_parameters() {
        let len = NonZeroU16::new(32).unwrap();
        assert_eq!(
            ExpandMsgXmd::<Sha256>::expand_message(&[b"msg"], &[b""], len).err(),
            Some(ExpandMsgXmdError::EmptyDst)
        );
        // 256 blocks of 32 bytes.
        let len = NonZeroU16::new(256 * 32).unwrap();
        assert_eq!(
            ExpandMsgXmd::<Sha256>::expand_message(&[b"msg"], &[DST], len).err(),
            Some(ExpandMsgXmdError::Length)
        );
        let len = NonZeroU16::new(255 * 64).unwrap();
        assert!(ExpandMsgXmd::<Sha512>::expand_message(&[b"msg"], &[DST], len).is_ok());

        let mut empty: [Fp; 0] = [];
        assert_eq!(
            hash_to_field::<Sha256, Fp>(&[b"msg"], &[DST], &mut empty),
            Err(ExpandMsgXmdError::Length)
        );
        let mut too_many = [Fp::ZERO; 1024];
        assert_eq!(
            hash_to_field::<Sha256, Fp>(&[b"msg"], &[DST], &mut too_many),
            Err(ExpandMsgXmdError::Length)
        );
    }

    #[test]
    fn hash_to_fp() {
        let mut u = [Fp::ZERO; 2];
        hash_to_field::<Sha256, Fp>(
            &[b""],
            &[b"QUUX-V01-CS02-with-BLS12381G1_XMD:SHA-256_SSWU_RO_"],
            &mut u,
        )
        .unwrap();
        assert_eq!(
            u,
            [
                fp("0ba14bd907ad64a016293ee7c2d276b8eae71f25a4b941eece7b0d89f17f75cb3ae5438a614fb61d6835ad59f29c564f"),
                fp("019b9bd7979f12657976de2884c7cce192b82c177c80e0ec604436a7f538d231552f0d96d9f7babe5fa3b19b3ff25ac9"),
            ]
        );
    }

    #[test]
    fn hash_to_fp2() {
        let mut u = [Fp2::ZERO; 2];
        hash_to_field::<Sha256, Fp2>(
            &[b""],
            &[b"QUUX-V01-CS02-with-BLS12381G2_XMD:SHA-256_SSWU_RO_"],
            &mut u,
        )
        .unwrap();
        assert_eq!(
            u,
            [
                Fp2::new(
                    fp("03dbc2cce174e91ba93cbb08f26b917f98194a2ea08d1cce75b2b9cc9f21689d80bd79b594a613d0a68eb807dfdc1cf8"),
                    fp("05a2acec64114845711a54199ea339abd125ba38253b70a92c876df10598bd1986b739cad67961eb94f7076511b3b39a"),
                ),
                Fp2::new(
                    fp("02f99798e8a5acdeed60d7e18e9120521ba1f47ec090984662846bc825de191b5b7641148c0dbc237726a334473eee94"),
                    fp("145a81e418d4010cc027a68f14391b30074e89e60ee7a22f87217b2f6eb0c4b94c9115b436e6fa4607e95a98de30a435"),
                ),
            ]
        );
    }

    #[test]
    fn hash_to_fr() {
        let mut u = [Fr::ZERO; 2];
        hash_to_field::<Sha256, Fr>(&[b"abc"], &[b"bls12_381-tests"], &mut u).unwrap();
        assert_eq!(
            u,
            [
                Fr::from_hex_vartime(
                    "6403e7e58a3c23cf505102d14e911f2de6a550f84b7431676aba45d4bcbc8c27"
                ),
                Fr::from_hex_vartime(
                    "6bd6f957636828aca78cadd075de9c47e880a668e25cc03fa4dc4fa0bc550dc4"
                ),
            ]
        );
    }
}
