//! Multi-scalar multiplication.
//!
//! All entry points compute `sum([k_i] P_i)` over public inputs. The Pippenger variants route
//! each point into a bucket per window, sum the buckets with a running sum, and combine the
//! windows with doublings. `msm_naive_vartime` is the reference they are tested against.

use crate::{
    Bucket, VartimeGroup,
    mul::mul_double_and_add_vartime,
    recode::{bits_vartime, signed_window_digits, unsigned_window_digit},
};
use alloc::{vec, vec::Vec};
use bigint::{Vartime, Word};
use group::Group;

/// Largest bucket width considered by the cost model.
const MAX_WINDOW: usize = 16;

/// Estimated number of group additions for Pippenger with `window`-bit digits.
fn cost(num_points: usize, bits: usize, window: usize, signed: bool) -> usize {
    let (num_windows, reduction) = match signed {
        // 2^(c-1) buckets, two additions each in the running-sum reduction
        true => ((bits + 1).div_ceil(window), 1 << window),
        false => (bits.div_ceil(window), 1 << (window + 1)),
    };
    num_windows * (num_points + reduction + window)
}

/// Pick the signed-digit window width for `num_points` scalars of `bits` bits.
///
/// Larger inputs amortize more buckets, so the result grows roughly like `log2(num_points)`.
pub fn best_window(num_points: usize, bits: usize) -> usize {
    best_window_by(num_points, bits, true)
}

fn best_window_by(num_points: usize, bits: usize, signed: bool) -> usize {
    let min = if signed { 2 } else { 1 };
    (min..=MAX_WINDOW)
        .min_by_key(|&c| cost(num_points, bits, c, signed))
        .unwrap_or(min)
}

/// Reference implementation: one double-and-add multiplication per term.
///
/// # Panics
///
/// If `points` and `scalars` differ in length.
pub fn msm_naive_vartime<G, S>(points: &[G], scalars: Vartime<&[S]>) -> G
where
    G: VartimeGroup,
    S: AsRef<[Word]>,
{
    let scalars = scalars.into_inner();
    assert_eq!(points.len(), scalars.len(), "length mismatch");

    points
        .iter()
        .zip(scalars)
        .fold(G::identity(), |acc, (point, scalar)| {
            let term = mul_double_and_add_vartime(point, Vartime::new(scalar.as_ref()));
            acc.add_vartime(&term)
        })
}

/// Sum `sum(j * buckets[j - 1])` with a running sum from the top bucket down.
fn reduce_buckets<A, B: Bucket<A>>(buckets: &[B]) -> B {
    let mut running = B::empty();
    let mut sum = B::empty();

    for bucket in buckets.iter().rev() {
        running = running.add_bucket(bucket);
        sum = sum.add_bucket(&running);
    }

    sum
}

/// Combine per-window sums, most significant first: `acc = 2^window * acc + w_i`.
fn combine_windows<A, B: Bucket<A>>(window_sums: impl DoubleEndedIterator<Item = B>, window: usize) -> B {
    let mut acc = B::empty();
    for (i, sum) in window_sums.rev().enumerate() {
        if i > 0 {
            for _ in 0..window {
                acc = acc.double_bucket();
            }
        }
        acc = acc.add_bucket(&sum);
    }
    acc
}

/// Shared preamble: validate lengths and find the widest scalar.
fn max_bits<A, S: AsRef<[Word]>>(points: &[A], scalars: &[S]) -> usize {
    assert_eq!(points.len(), scalars.len(), "length mismatch");
    scalars
        .iter()
        .map(|s| bits_vartime(Vartime::new(s.as_ref())))
        .max()
        .unwrap_or(0)
}

/// Signed-digit recoding of every scalar for window width `window`.
fn signed_digits<S: AsRef<[Word]>>(scalars: &[S], window: usize, num_windows: usize) -> Vec<Vec<i32>> {
    scalars
        .iter()
        .map(|s| signed_window_digits(Vartime::new(s.as_ref()), window, num_windows))
        .collect()
}

/// Bucket sum for one signed-digit window.
fn signed_window_sum<A, B: Bucket<A>>(points: &[A], digits: &[Vec<i32>], index: usize, window: usize) -> B {
    let mut buckets = vec![B::empty(); 1 << (window - 1)];

    for (point, digits) in points.iter().zip(digits) {
        match digits[index] {
            0 => (),
            d if d > 0 => buckets[d as usize - 1].add_assign_point(point),
            d => buckets[d.unsigned_abs() as usize - 1].sub_assign_point(point),
        }
    }

    reduce_buckets::<A, B>(&buckets)
}

/// Pippenger's bucket method with signed digits and `2^(c-1)` buckets per window.
///
/// Points are taken in the bucket input representation `A` (typically affine), and `B` selects
/// the bucket coordinates. Scalars are public little-endian limbs and may be unreduced.
///
/// # Panics
///
/// If `points` and `scalars` differ in length.
pub fn msm_vartime<B, A, S>(points: &[A], scalars: Vartime<&[S]>) -> B::Output
where
    B: Bucket<A>,
    S: AsRef<[Word]>,
{
    let scalars = scalars.into_inner();
    let bits = max_bits(points, scalars);
    if bits == 0 {
        return B::Output::identity();
    }

    let window = best_window(points.len(), bits);
    let num_windows = (bits + 1) / window + 1;
    let digits = signed_digits(scalars, window, num_windows);

    let sums = (0..num_windows).map(|i| signed_window_sum::<A, B>(points, &digits, i, window));
    combine_windows::<A, B>(sums, window).to_output()
}

/// Pippenger's bucket method with unsigned digits and `2^c - 1` buckets per window.
///
/// # Panics
///
/// If `points` and `scalars` differ in length.
pub fn msm_unsigned_vartime<B, A, S>(points: &[A], scalars: Vartime<&[S]>) -> B::Output
where
    B: Bucket<A>,
    S: AsRef<[Word]>,
{
    let scalars = scalars.into_inner();
    let bits = max_bits(points, scalars);
    if bits == 0 {
        return B::Output::identity();
    }

    let window = best_window_by(points.len(), bits, false);
    let num_windows = bits.div_ceil(window);
    let mut buckets = vec![B::empty(); (1 << window) - 1];

    let sums = (0..num_windows).map(|index| {
        buckets.fill(B::empty());
        for (point, scalar) in points.iter().zip(scalars) {
            match unsigned_window_digit(Vartime::new(scalar.as_ref()), window, index) {
                0 => (),
                d => buckets[d - 1].add_assign_point(point),
            }
        }
        reduce_buckets::<A, B>(&buckets)
    });

    combine_windows::<A, B>(sums, window).to_output()
}

/// [`msm_vartime`] with one rayon task per window.
///
/// Each task owns its buckets; the window sums are combined on the calling thread.
///
/// # Panics
///
/// If `points` and `scalars` differ in length.
#[cfg(feature = "parallel")]
pub fn msm_parallel_vartime<B, A, S>(points: &[A], scalars: Vartime<&[S]>) -> B::Output
where
    A: Sync,
    B: Bucket<A>,
    S: AsRef<[Word]> + Sync,
{
    use rayon::prelude::*;

    let scalars = scalars.into_inner();
    let bits = max_bits(points, scalars);
    if bits == 0 {
        return B::Output::identity();
    }

    let window = best_window(points.len(), bits);
    let num_windows = (bits + 1) / window + 1;
    let digits = signed_digits(scalars, window, num_windows);

    let sums: Vec<B> = (0..num_windows)
        .into_par_iter()
        .map(|i| signed_window_sum::<A, B>(points, &digits, i, window))
        .collect();

    combine_windows::<A, B>(sums.into_iter(), window).to_output()
}

#[cfg(test)]
mod tests {
    use super::best_window;

    #[test]
    fn window_grows_with_input_size() {
        let mut previous = 0;
        for log_n in [0, 4, 8, 12, 16, 20] {
            let window = best_window(1 << log_n, 255);
            assert!(window >= previous, "n = 2^{log_n}");
            assert!((2..=16).contains(&window));
            previous = window;
        }
        assert!(best_window(1 << 16, 255) > best_window(1 << 4, 255));
    }
}
