//! Modular square root implementations, adapted from <https://eprint.iacr.org/2012/685.pdf>.

use crate::{MontyFieldElement, MontyFieldParams};
use bigint::Uint;
use ff::PrimeField;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Square root algorithms.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Algorithm {
    /// Shanks algorithm for `q ≡ 3 (mod 4)`.
    Shanks,

    /// Tonelli-Shanks algorithm for any odd prime.
    #[default]
    TonelliShanks,
}

impl Algorithm {
    /// Determine the best algorithm to use with a particular modulus.
    const fn for_modulus<const LIMBS: usize>(p: &Uint<LIMBS>) -> Self {
        if p.as_words()[0] & 3 == 3 {
            Self::Shanks
        } else {
            Self::TonelliShanks
        }
    }
}

impl<MOD, const LIMBS: usize> MontyFieldElement<MOD, LIMBS>
where
    Self: PrimeField,
    MOD: MontyFieldParams<LIMBS>,
{
    /// Returns the square root of self mod p, or `None` if no square root exists.
    #[inline]
    pub fn sqrt(&self) -> CtOption<Self> {
        match const { Algorithm::for_modulus(MOD::PARAMS.modulus()) } {
            Algorithm::Shanks => self.sqrt_shanks(),
            Algorithm::TonelliShanks => self.sqrt_tonelli_shanks(),
        }
    }

    /// Shanks algorithm for `q ≡ 3 (mod 4)`.
    ///
    /// For `q = 3 (mod 4)`, sqrt can be computed with only one exponentiation as
    /// `self^((q + 1) / 4) (mod q)`.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    fn sqrt_shanks(&self) -> CtOption<Self> {
        debug_assert!(MOD::PARAMS.modulus().as_words()[0] & 3 == 3);

        // (q + 1) / 4 without overflowing: (q >> 2) + 1 since q ≡ 3 (mod 4).
        let mod_plus_1_over_4 = const {
            MOD::PARAMS
                .modulus()
                .shr_vartime(2)
                .wrapping_add(&Uint::<LIMBS>::ONE)
        };

        let sqrt = self.pow_vartime(&mod_plus_1_over_4);
        CtOption::new(sqrt, (sqrt * sqrt).ct_eq(self))
    }

    /// Tonelli-Shanks algorithm works for every odd prime.
    ///
    /// From <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    fn sqrt_tonelli_shanks(&self) -> CtOption<Self> {
        let t_minus_1_over_2 = const { MOD::T.wrapping_sub(&Uint::<LIMBS>::ONE).shr_vartime(1) };
        let w = self.pow_vartime(&t_minus_1_over_2);

        let mut v = Self::S;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }
}
