//! Marker for values which may be handled in variable time.

use core::fmt;

/// A value which has been declared public.
///
/// Functions that branch on, index by, or loop over an operand take that
/// operand as `Vartime<T>`. Wrapping a value with [`Vartime::new`] is an
/// explicit declassification and should only be done for data that is not
/// secret: public keys, verification inputs, published scalars and the like.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Vartime<T>(T);

impl<T> Vartime<T> {
    /// Declare `value` public.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value.
    #[inline]
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Unwrap the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Convert `&Vartime<T>` to `Vartime<&T>`.
    #[inline]
    pub const fn by_ref(&self) -> Vartime<&T> {
        Vartime(&self.0)
    }

    /// Apply `f` to the wrapped value, keeping it marked public.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Vartime<U> {
        Vartime(f(self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Vartime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vartime").field(&self.0).finish()
    }
}
