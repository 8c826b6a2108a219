//! Internal macros.
//!
//! Each macro derives the owned and mixed-borrow operator variants from the `&lhs op &rhs`
//! impl, which must be written by hand.

/// Define borrow and non-borrow variants of `Add`.
macro_rules! define_add_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<C: EdwardsParams> Add<&$rhs> for $lhs {
            type Output = $out;

            fn add(self, rhs: &$rhs) -> $out {
                &self + rhs
            }
        }

        impl<C: EdwardsParams> Add<$rhs> for &$lhs {
            type Output = $out;

            fn add(self, rhs: $rhs) -> $out {
                self + &rhs
            }
        }

        impl<C: EdwardsParams> Add<$rhs> for $lhs {
            type Output = $out;

            fn add(self, rhs: $rhs) -> $out {
                &self + &rhs
            }
        }
    };
}

/// Define borrow and non-borrow variants of `AddAssign`.
macro_rules! define_add_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<C: EdwardsParams> AddAssign<&$rhs> for $lhs {
            fn add_assign(&mut self, rhs: &$rhs) {
                *self = &*self + rhs;
            }
        }

        impl<C: EdwardsParams> AddAssign<$rhs> for $lhs {
            fn add_assign(&mut self, rhs: $rhs) {
                *self = &*self + &rhs;
            }
        }
    };
}

/// Define borrow and non-borrow variants of `Sub`.
macro_rules! define_sub_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<C: EdwardsParams> Sub<&$rhs> for $lhs {
            type Output = $out;

            fn sub(self, rhs: &$rhs) -> $out {
                &self - rhs
            }
        }

        impl<C: EdwardsParams> Sub<$rhs> for &$lhs {
            type Output = $out;

            fn sub(self, rhs: $rhs) -> $out {
                self - &rhs
            }
        }

        impl<C: EdwardsParams> Sub<$rhs> for $lhs {
            type Output = $out;

            fn sub(self, rhs: $rhs) -> $out {
                &self - &rhs
            }
        }
    };
}

/// Define borrow and non-borrow variants of `SubAssign`.
macro_rules! define_sub_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<C: EdwardsParams> SubAssign<&$rhs> for $lhs {
            fn sub_assign(&mut self, rhs: &$rhs) {
                *self = &*self - rhs;
            }
        }

        impl<C: EdwardsParams> SubAssign<$rhs> for $lhs {
            fn sub_assign(&mut self, rhs: $rhs) {
                *self = &*self - &rhs;
            }
        }
    };
}
