//! Zeroization of secret-derived working storage.
//!
//! [`erase`] wipes a buffer at a chosen point (the last read of a secret).
//! [`EraseOnDrop`] wraps a whole scratch object so that whatever is left is
//! wiped when the guard goes out of scope, including during unwinding.

use core::ops::{Deref, DerefMut};

use zeroize::Zeroize;

/// Zero-fill `value` over its whole storage.
#[inline]
pub fn erase<T: Zeroize + ?Sized>(value: &mut T) {
    value.zeroize();
}

/// Exclusive borrow of `T` that zeroizes it on drop.
pub struct EraseOnDrop<'a, T: Zeroize + ?Sized> {
    inner: &'a mut T,
}

impl<'a, T: Zeroize + ?Sized> EraseOnDrop<'a, T> {
    /// Guard `inner` until the returned value is dropped.
    #[inline]
    pub fn new(inner: &'a mut T) -> Self {
        Self { inner }
    }
}

impl<T: Zeroize + ?Sized> Deref for EraseOnDrop<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.inner
    }
}

impl<T: Zeroize + ?Sized> DerefMut for EraseOnDrop<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.inner
    }
}

impl<T: Zeroize + ?Sized> Drop for EraseOnDrop<'_, T> {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<T: Zeroize + ?Sized> core::fmt::Debug for EraseOnDrop<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EraseOnDrop").finish_non_exhaustive()
    }
}
