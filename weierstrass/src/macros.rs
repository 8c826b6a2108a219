//! Operator impls shared by the non-affine coordinate systems.

/// Emit `core::ops`, `Sum` and scalar multiplication impls for a point type whose inherent
/// `add`, `add_mixed`, `sub`, `sub_mixed`, `neg` and `mul` are already defined.
macro_rules! impl_point_ops {
    ($point:ident) => {
        impl_point_ops!(@binary $point, Add, add, AddAssign, add_assign, $point, add);
        impl_point_ops!(@binary $point, Sub, sub, SubAssign, sub_assign, $point, sub);
        impl_point_ops!(@binary $point, Add, add, AddAssign, add_assign, AffinePoint, add_mixed);
        impl_point_ops!(@binary $point, Sub, sub, SubAssign, sub_assign, AffinePoint, sub_mixed);

        impl<C: CurveParams> core::ops::Neg for $point<C> {
            type Output = Self;

            fn neg(self) -> Self {
                $point::neg(&self)
            }
        }

        impl<C: CurveParams> core::ops::Neg for &$point<C> {
            type Output = $point<C>;

            fn neg(self) -> $point<C> {
                $point::neg(self)
            }
        }

        impl<C: CurveParams> core::iter::Sum for $point<C> {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::IDENTITY, |a, b| a + b)
            }
        }

        impl<'a, C: CurveParams> core::iter::Sum<&'a $point<C>> for $point<C> {
            fn sum<I: Iterator<Item = &'a $point<C>>>(iter: I) -> Self {
                iter.cloned().sum()
            }
        }

        impl<C, S> core::ops::Mul<S> for $point<C>
        where
            C: CurveParams,
            S: core::borrow::Borrow<C::Scalar>,
        {
            type Output = Self;

            fn mul(self, scalar: S) -> Self {
                $point::mul(&self, scalar.borrow())
            }
        }

        impl<C, S> core::ops::Mul<S> for &$point<C>
        where
            C: CurveParams,
            S: core::borrow::Borrow<C::Scalar>,
        {
            type Output = $point<C>;

            fn mul(self, scalar: S) -> $point<C> {
                $point::mul(self, scalar.borrow())
            }
        }

        impl<C, S> core::ops::MulAssign<S> for $point<C>
        where
            C: CurveParams,
            S: core::borrow::Borrow<C::Scalar>,
        {
            fn mul_assign(&mut self, scalar: S) {
                *self = $point::mul(self, scalar.borrow());
            }
        }
    };
    (@binary $point:ident, $op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, $rhs:ident, $method:ident) => {
        impl<C: CurveParams> core::ops::$op<$rhs<C>> for $point<C> {
            type Output = $point<C>;

            fn $op_fn(self, other: $rhs<C>) -> $point<C> {
                $point::$method(&self, &other)
            }
        }

        impl<C: CurveParams> core::ops::$op<&$rhs<C>> for $point<C> {
            type Output = $point<C>;

            fn $op_fn(self, other: &$rhs<C>) -> $point<C> {
                $point::$method(&self, other)
            }
        }

        impl<C: CurveParams> core::ops::$op<&$rhs<C>> for &$point<C> {
            type Output = $point<C>;

            fn $op_fn(self, other: &$rhs<C>) -> $point<C> {
                $point::$method(self, other)
            }
        }

        impl<C: CurveParams> core::ops::$assign<$rhs<C>> for $point<C> {
            fn $assign_fn(&mut self, rhs: $rhs<C>) {
                *self = $point::$method(self, &rhs);
            }
        }

        impl<C: CurveParams> core::ops::$assign<&$rhs<C>> for $point<C> {
            fn $assign_fn(&mut self, rhs: &$rhs<C>) {
                *self = $point::$method(self, rhs);
            }
        }
    };
}
