//! Modular arithmetic over a fixed odd modulus.
//!
//! Elements handled here are plain [`Uint`]s which the caller keeps reduced
//! (`< modulus`). [`montgomery_mul`] is the CIOS variant of Montgomery
//! multiplication and works for any odd modulus, including ones using the
//! full width of the top limb.

use crate::{
    Uint, Vartime,
    limb::{self, Word},
};

/// Montgomery parameters for an odd modulus `m` with `R = 2^(64 * LIMBS)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontyParams<const LIMBS: usize> {
    /// The modulus.
    modulus: Uint<LIMBS>,

    /// `R mod m`, i.e. one in Montgomery form.
    one: Uint<LIMBS>,

    /// `R^2 mod m`, used to convert into Montgomery form.
    r2: Uint<LIMBS>,

    /// `-m^-1 mod 2^64`.
    mod_neg_inv: Word,
}

impl<const LIMBS: usize> MontyParams<LIMBS> {
    /// Derive the parameters for `modulus`.
    ///
    /// Intended to be evaluated at compile time for public moduli.
    ///
    /// # Panics
    ///
    /// If the modulus is even or smaller than 3.
    pub const fn new_vartime(modulus: Uint<LIMBS>) -> Self {
        assert!(modulus.as_words()[0] & 1 == 1, "modulus must be odd");
        assert!(
            modulus.cmp_vartime(&Uint::from_u64(3)).is_ge(),
            "modulus must be at least 3"
        );

        let mut one = Uint::ONE;
        let mut i = 0;
        while i < Uint::<LIMBS>::BITS {
            one = add_mod(&one, &one, &modulus);
            i += 1;
        }

        let mut r2 = one;
        let mut i = 0;
        while i < Uint::<LIMBS>::BITS {
            r2 = add_mod(&r2, &r2, &modulus);
            i += 1;
        }

        // Newton iteration doubles the number of correct low bits each round.
        let m0 = modulus.as_words()[0];
        let mut inv: Word = 1;
        let mut i = 0;
        while i < 6 {
            inv = inv.wrapping_mul((2 as Word).wrapping_sub(m0.wrapping_mul(inv)));
            i += 1;
        }

        Self {
            modulus,
            one,
            r2,
            mod_neg_inv: inv.wrapping_neg(),
        }
    }

    /// The modulus.
    #[inline]
    pub const fn modulus(&self) -> &Uint<LIMBS> {
        &self.modulus
    }

    /// `R mod m`.
    #[inline]
    pub const fn one(&self) -> &Uint<LIMBS> {
        &self.one
    }

    /// `R^2 mod m`.
    #[inline]
    pub const fn r2(&self) -> &Uint<LIMBS> {
        &self.r2
    }

    /// `-m^-1 mod 2^64`.
    #[inline]
    pub const fn mod_neg_inv(&self) -> Word {
        self.mod_neg_inv
    }
}

/// Computes `a * b * R^-1 mod m` for `a, b < m`.
pub const fn montgomery_mul<const LIMBS: usize>(
    a: &Uint<LIMBS>,
    b: &Uint<LIMBS>,
    params: &MontyParams<LIMBS>,
) -> Uint<LIMBS> {
    let a = a.as_words();
    let b = b.as_words();
    let m = params.modulus.as_words();

    let mut t = [0 as Word; LIMBS];
    let mut t_hi: Word = 0;

    let mut i = 0;
    while i < LIMBS {
        // t += a * b[i]
        let mut carry = 0;
        let mut j = 0;
        while j < LIMBS {
            let (w, c) = limb::mac(t[j], a[j], b[i], carry);
            t[j] = w;
            carry = c;
            j += 1;
        }
        let (acc, t_top) = limb::adc(t_hi, carry, 0);

        // t = (t + k * m) / 2^64
        let k = t[0].wrapping_mul(params.mod_neg_inv);
        let (_, mut carry) = limb::mac(t[0], k, m[0], 0);
        let mut j = 1;
        while j < LIMBS {
            let (w, c) = limb::mac(t[j], k, m[j], carry);
            t[j - 1] = w;
            carry = c;
            j += 1;
        }
        let (w, c) = limb::adc(acc, carry, 0);
        t[LIMBS - 1] = w;
        t_hi = t_top + c;

        i += 1;
    }

    let t = Uint::from_words(t);
    let (reduced, borrow) = t.sbb(&params.modulus, 0);

    // Keep `t` only when it is already below the modulus and nothing spilled over.
    let keep = borrow & (t_hi ^ 1);
    Uint::select(&reduced, &t, limb::mask(keep))
}

/// Computes `a + b mod m` for `a, b < m`.
pub const fn add_mod<const LIMBS: usize>(
    a: &Uint<LIMBS>,
    b: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
) -> Uint<LIMBS> {
    let (sum, carry) = a.adc(b, 0);
    let (reduced, borrow) = sum.sbb(modulus, 0);
    let keep = borrow & (carry ^ 1);
    Uint::select(&reduced, &sum, limb::mask(keep))
}

/// Computes `a - b mod m` for `a, b < m`.
pub const fn sub_mod<const LIMBS: usize>(
    a: &Uint<LIMBS>,
    b: &Uint<LIMBS>,
    modulus: &Uint<LIMBS>,
) -> Uint<LIMBS> {
    let (diff, borrow) = a.sbb(b, 0);
    let addend = Uint::select(&Uint::ZERO, modulus, limb::mask(borrow));
    diff.wrapping_add(&addend)
}

/// Computes `-a mod m` for `a < m`. Zero maps to zero.
pub const fn neg_mod<const LIMBS: usize>(a: &Uint<LIMBS>, modulus: &Uint<LIMBS>) -> Uint<LIMBS> {
    sub_mod(&Uint::ZERO, a, modulus)
}

/// Computes `2a mod m` for `a < m`.
#[inline]
pub const fn double_mod<const LIMBS: usize>(a: &Uint<LIMBS>, modulus: &Uint<LIMBS>) -> Uint<LIMBS> {
    add_mod(a, a, modulus)
}

/// Computes `a / 2 mod m` for `a < m`.
pub const fn half_mod<const LIMBS: usize>(a: &Uint<LIMBS>, modulus: &Uint<LIMBS>) -> Uint<LIMBS> {
    let odd = a.as_words()[0] & 1;
    let addend = Uint::select(&Uint::ZERO, modulus, limb::mask(odd));
    let (sum, carry) = a.adc(&addend, 0);
    let (half, _) = sum.shr1();

    let mut words = half.to_words();
    words[LIMBS - 1] |= carry << (limb::WORD_BITS - 1);
    Uint::from_words(words)
}

/// Computes `a * b mod m` for `a, b < m` on plain (non-Montgomery) values.
#[inline]
pub const fn mul_mod<const LIMBS: usize>(
    a: &Uint<LIMBS>,
    b: &Uint<LIMBS>,
    params: &MontyParams<LIMBS>,
) -> Uint<LIMBS> {
    let ab_r_inv = montgomery_mul(a, b, params);
    montgomery_mul(&ab_r_inv, &params.r2, params)
}

/// Computes `a^2 mod m` for `a < m` on plain (non-Montgomery) values.
#[inline]
pub const fn square_mod<const LIMBS: usize>(
    a: &Uint<LIMBS>,
    params: &MontyParams<LIMBS>,
) -> Uint<LIMBS> {
    mul_mod(a, a, params)
}

/// Computes `a^-1 mod m` with the binary extended Euclidean algorithm.
///
/// Returns `None` if `a` is not invertible. Requires `a < m`.
pub fn inv_mod_vartime<const LIMBS: usize>(
    a: Vartime<&Uint<LIMBS>>,
    modulus: &Uint<LIMBS>,
) -> Option<Uint<LIMBS>> {
    let a = **a.get();
    debug_assert!(a.cmp_vartime(modulus).is_lt());

    if a.is_zero_vartime() {
        return None;
    }

    let mut u = a;
    let mut v = *modulus;
    let mut x1 = Uint::ONE;
    let mut x2 = Uint::ZERO;

    while u != Uint::ONE && v != Uint::ONE {
        if u.is_zero_vartime() || v.is_zero_vartime() {
            return None;
        }

        while u.as_words()[0] & 1 == 0 {
            u = u.shr1().0;
            x1 = half_mod(&x1, modulus);
        }

        while v.as_words()[0] & 1 == 0 {
            v = v.shr1().0;
            x2 = half_mod(&x2, modulus);
        }

        if u.cmp_vartime(&v).is_ge() {
            u = u.wrapping_sub(&v);
            x1 = sub_mod(&x1, &x2, modulus);
        } else {
            v = v.wrapping_sub(&u);
            x2 = sub_mod(&x2, &x1, modulus);
        }
    }

    if u == Uint::ONE { Some(x1) } else { Some(x2) }
}
