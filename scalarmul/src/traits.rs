//! Extension traits implemented by the coordinate crates.

use group::Group;

/// Group operations which may branch on their (public) inputs.
///
/// The provided methods fall back to the constant-time [`Group`] operations, which is what
/// coordinate systems with complete formulas want. Representations with cheaper exceptional
/// formulas (Jacobian, XYZZ) override them.
pub trait VartimeGroup: Group {
    /// Add two public points.
    fn add_vartime(&self, rhs: &Self) -> Self {
        *self + rhs
    }

    /// Double a public point.
    fn double_vartime(&self) -> Self {
        self.double()
    }

    /// Is this public point the identity?
    fn is_identity_vartime(&self) -> bool {
        self.is_identity().into()
    }
}

/// Accumulator used for the buckets of a multi-scalar multiplication.
///
/// `A` is the representation of the input points (usually affine). Buckets only ever receive
/// public data, so every operation is variable time.
pub trait Bucket<A>: Copy + Send + Sync {
    /// Group in which the result is returned.
    type Output: VartimeGroup;

    /// Empty bucket.
    fn empty() -> Self;

    /// `self += point`.
    fn add_assign_point(&mut self, point: &A);

    /// `self -= point`.
    fn sub_assign_point(&mut self, point: &A);

    /// `self + rhs`.
    fn add_bucket(&self, rhs: &Self) -> Self;

    /// `2 * self`.
    fn double_bucket(&self) -> Self;

    /// Convert to the output group.
    fn to_output(&self) -> Self::Output;
}
