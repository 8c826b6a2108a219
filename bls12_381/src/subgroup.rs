//! Prime order subgroup membership and cofactor clearing.
//!
//! The fast paths use the curve endomorphisms; the reference paths multiply by `r` or by the
//! effective cofactor with plain double-and-add, and exist to cross-check the fast ones.

use crate::{
    BLS_X,
    g1::{G1Projective, Glv},
    g2::{G2Projective, Gls},
    scalar::ORDER,
};
use group::Group;
use scalarmul::{Vartime, VartimeGroup, Word};
use subtle::{Choice, ConstantTimeEq};

/// `h_eff` for G1 from RFC 9380: `1 - z`.
const H_EFF_G1: [Word; 1] = [0xd201_0000_0001_0001];

/// `h_eff` for G2 from RFC 9380.
const H_EFF_G2: [Word; 10] = [
    0xe802_0005_aaa9_5551,
    0x5989_4c0a_debb_f6b4,
    0xe954_cbc0_6689_f6a3,
    0x2ec0_ec69_d747_7c1a,
    0x6d82_bf01_5d12_12b0,
    0x329c_2f17_8731_db95,
    0x9986_ff03_1508_ffe1,
    0x88e2_a8e9_145a_d768,
    0x584c_6a0e_a91b_3528,
    0x0bc6_9f08_f2ee_75b3,
];

/// Subgroup checks and cofactor clearing for the pairing groups.
pub trait Subgroup: Sized {
    /// Is this point in the prime order subgroup? Uses the endomorphism.
    fn is_torsion_free(&self) -> Choice;

    /// `[r]P == O`, for public points.
    fn is_torsion_free_reference(&self) -> bool;

    /// Map a point of the full curve group into the prime order subgroup.
    fn clear_cofactor(&self) -> Self;

    /// [`Subgroup::clear_cofactor`] by multiplication with `h_eff`, for public points.
    fn clear_cofactor_reference(&self) -> Self;
}

impl Subgroup for G1Projective {
    /// `phi(P) == [z^2 - 1]P`
    fn is_torsion_free(&self) -> Choice {
        let rhs = mul_by_x(&mul_by_x(self)) - self;
        self.phi().ct_eq(&rhs)
    }

    fn is_torsion_free_reference(&self) -> bool {
        let order = Vartime::new(&ORDER[..]);
        scalarmul::mul_double_and_add_vartime(self, order).is_identity_vartime()
    }

    /// `[1 - z]P`
    fn clear_cofactor(&self) -> Self {
        *self - mul_by_x(self)
    }

    fn clear_cofactor_reference(&self) -> Self {
        scalarmul::mul_double_and_add_vartime(self, Vartime::new(&H_EFF_G1[..]))
    }
}

impl Subgroup for G2Projective {
    /// `psi(Q) == [z]Q`
    fn is_torsion_free(&self) -> Choice {
        self.psi().ct_eq(&mul_by_x(self))
    }

    fn is_torsion_free_reference(&self) -> bool {
        let order = Vartime::new(&ORDER[..]);
        scalarmul::mul_double_and_add_vartime(self, order).is_identity_vartime()
    }

    /// Budroni-Pintore: `[z^2 - z - 1]Q + [z - 1]psi(Q) + psi^2(2Q)`.
    fn clear_cofactor(&self) -> Self {
        let t1 = mul_by_x(self);
        let t2 = self.psi();
        let t3 = mul_by_x(&(t1 + t2));
        t3 - t1 - self - t2 + self.double().psi2()
    }

    fn clear_cofactor_reference(&self) -> Self {
        scalarmul::mul_double_and_add_vartime(self, Vartime::new(&H_EFF_G2[..]))
    }
}

/// `[z]P` through the fixed addition chain of `|z|` followed by a negation.
///
/// `|z|` has Hamming weight 6, so this costs 63 doublings and 5 additions. The chain only
/// depends on the public curve parameter.
pub(crate) fn mul_by_x<G: Group>(p: &G) -> G {
    let mut acc = *p;
    for i in (0..63).rev() {
        acc = acc.double();
        if (BLS_X >> i) & 1 == 1 {
            acc += p;
        }
    }
    -acc
}

#[cfg(test)]
mod tests {
    use super::{Subgroup, mul_by_x};
    use crate::{BLS_X, Fp, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
    use group::Group;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    #[test]
    fn mul_by_x_matches_scalar_mul() {
        let g = G1Projective::GENERATOR;
        assert_eq!(mul_by_x(&g), -(g * Fr::from(BLS_X)));
        let g = G2Projective::GENERATOR;
        assert_eq!(mul_by_x(&g), -(g * Fr::from(BLS_X)));
    }

    #[test]
    fn g1_subgroup_check() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        assert!(bool::from(G1Projective::IDENTITY.is_torsion_free()));
        assert!(bool::from(G1Projective::GENERATOR.is_torsion_free()));

        for _ in 0..8 {
            let p = G1Projective::from(G1Affine::random(&mut rng));
            let reference = p.is_torsion_free_reference();
            assert_eq!(bool::from(p.is_torsion_free()), reference);
            assert!(!reference);

            let cleared = p.clear_cofactor();
            assert_eq!(cleared, p.clear_cofactor_reference());
            assert!(bool::from(cleared.is_torsion_free()));
            assert!(cleared.is_torsion_free_reference());

            let q = G1Projective::random(&mut rng);
            assert!(bool::from(q.is_torsion_free()));
            assert!(q.is_torsion_free_reference());
        }
    }

    #[test]
    fn g2_subgroup_check() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        assert!(bool::from(G2Projective::IDENTITY.is_torsion_free()));
        assert!(bool::from(G2Projective::GENERATOR.is_torsion_free()));

        for _ in 0..4 {
            let p = G2Projective::from(G2Affine::random(&mut rng));
            let reference = p.is_torsion_free_reference();
            assert_eq!(bool::from(p.is_torsion_free()), reference);
            assert!(!reference);

            let cleared = p.clear_cofactor();
            assert_eq!(cleared, p.clear_cofactor_reference());
            assert!(bool::from(cleared.is_torsion_free()));
            assert!(cleared.is_torsion_free_reference());
        }
    }

    #[test]
    fn points_of_small_order_are_rejected() {
        // (0, 2) has order 3 on E(Fp).
        let p = G1Projective::from(G1Affine::new(Fp::ZERO, Fp::from(2u64)).unwrap());
        assert_eq!(p.double() + p, G1Projective::IDENTITY);
        assert!(!bool::from(p.is_torsion_free()));
        assert!(!p.is_torsion_free_reference());
        assert_eq!(p.clear_cofactor(), G1Projective::IDENTITY);
    }
}
