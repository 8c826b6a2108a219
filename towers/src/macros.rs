//! Operator boilerplate shared by the extension constructors.

/// Emit `core::ops`, `subtle` and iterator trait impls for an extension type whose inherent
/// `add`, `sub`, `mul`, `neg`, `conditional_select` and `ct_eq` helpers are already defined.
macro_rules! impl_extension_ops {
    ($ext:ident, $params:ident) => {
        impl_extension_ops!(@binary $ext, $params, Add, add, add);
        impl_extension_ops!(@binary $ext, $params, Sub, sub, sub);
        impl_extension_ops!(@binary $ext, $params, Mul, mul, mul);
        impl_extension_ops!(@assign $ext, $params, AddAssign, add_assign, add);
        impl_extension_ops!(@assign $ext, $params, SubAssign, sub_assign, sub);
        impl_extension_ops!(@assign $ext, $params, MulAssign, mul_assign, mul);

        impl<P: $params> core::ops::Neg for $ext<P> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::neg(&self)
            }
        }

        impl<P: $params> core::ops::Neg for &$ext<P> {
            type Output = $ext<P>;

            #[inline]
            fn neg(self) -> $ext<P> {
                $ext::neg(self)
            }
        }

        impl<P: $params> subtle::ConditionallySelectable for $ext<P> {
            fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                Self::select(a, b, choice)
            }
        }

        impl<P: $params> subtle::ConstantTimeEq for $ext<P> {
            fn ct_eq(&self, other: &Self) -> subtle::Choice {
                Self::ct_eq_inner(self, other)
            }
        }

        impl<P: $params> PartialEq for $ext<P> {
            fn eq(&self, other: &Self) -> bool {
                Self::ct_eq_inner(self, other).into()
            }
        }

        impl<P: $params> Eq for $ext<P> {}

        impl<P: $params> Default for $ext<P> {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl<P: $params> zeroize::DefaultIsZeroes for $ext<P> {}

        impl<P: $params> core::iter::Sum for $ext<P> {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, |acc, x| Self::add(&acc, &x))
            }
        }

        impl<'a, P: $params> core::iter::Sum<&'a $ext<P>> for $ext<P> {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, |acc, x| Self::add(&acc, x))
            }
        }

        impl<P: $params> core::iter::Product for $ext<P> {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ONE, |acc, x| Self::mul(&acc, &x))
            }
        }

        impl<'a, P: $params> core::iter::Product<&'a $ext<P>> for $ext<P> {
            fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.fold(Self::ONE, |acc, x| Self::mul(&acc, x))
            }
        }

        impl<P: $params> $crate::TowerField for $ext<P> {
            const ZERO: Self = Self::ZERO;
            const ONE: Self = Self::ONE;

            #[inline]
            fn square(&self) -> Self {
                Self::square(self)
            }

            #[inline]
            fn double(&self) -> Self {
                Self::double(self)
            }

            #[inline]
            fn invert(&self) -> subtle::CtOption<Self> {
                Self::invert(self)
            }

            #[inline]
            fn is_zero(&self) -> subtle::Choice {
                Self::is_zero(self)
            }

            #[inline]
            fn frobenius_map(&self, power: usize) -> Self {
                Self::frobenius_map(self, power)
            }
        }
    };
    (@binary $ext:ident, $params:ident, $op:ident, $func:ident, $inner:ident) => {
        impl<P: $params> core::ops::$op for $ext<P> {
            type Output = Self;

            #[inline]
            fn $func(self, rhs: Self) -> Self {
                Self::$inner(&self, &rhs)
            }
        }

        impl<P: $params> core::ops::$op<&$ext<P>> for $ext<P> {
            type Output = Self;

            #[inline]
            fn $func(self, rhs: &Self) -> Self {
                Self::$inner(&self, rhs)
            }
        }

        impl<P: $params> core::ops::$op<&$ext<P>> for &$ext<P> {
            type Output = $ext<P>;

            #[inline]
            fn $func(self, rhs: &$ext<P>) -> $ext<P> {
                $ext::$inner(self, rhs)
            }
        }
    };
    (@assign $ext:ident, $params:ident, $op:ident, $func:ident, $inner:ident) => {
        impl<P: $params> core::ops::$op for $ext<P> {
            #[inline]
            fn $func(&mut self, rhs: Self) {
                *self = Self::$inner(self, &rhs);
            }
        }

        impl<P: $params> core::ops::$op<&$ext<P>> for $ext<P> {
            #[inline]
            fn $func(&mut self, rhs: &Self) {
                *self = Self::$inner(self, rhs);
            }
        }
    };
}
