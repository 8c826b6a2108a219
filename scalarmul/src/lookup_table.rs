//! Constant-time table of small multiples of a point.

use group::Group;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Number of entries in a [`LookupTable`].
const LUT_SIZE: usize = 8;

/// Lookup table containing precomputed values `[p, 2p, 3p, ..., 8p]`
#[derive(Clone, Copy, Debug)]
pub struct LookupTable<G> {
    points: [G; LUT_SIZE],
}

impl<G> LookupTable<G>
where
    G: ConditionallySelectable + Group,
{
    /// Compute a new lookup table from the given point.
    pub fn new(p: &G) -> Self {
        let mut points = [*p; LUT_SIZE];

        for j in 0..(LUT_SIZE - 1) {
            points[j + 1] = *p + points[j];
        }

        Self { points }
    }

    /// Given `-8 <= x <= 8`, returns `x * p` in constant time.
    ///
    /// Every entry is read regardless of `x`.
    pub fn select(&self, x: i8) -> G {
        debug_assert!((-8..=8).contains(&x));

        // xabs = |x|
        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        let mut t = G::identity();

        for (j, point) in (1u8..).zip(self.points.iter()) {
            t.conditional_assign(point, (xabs as u8).ct_eq(&j));
        }

        let neg = -t;
        t.conditional_assign(&neg, Choice::from((xmask & 1) as u8));
        t
    }
}
