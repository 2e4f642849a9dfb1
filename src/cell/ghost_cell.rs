//! `GhostCell` — safe interior mutability via branded tokens.
//!
//! ## Safety invariant
//!
//! For a fixed brand `'brand`, the only safe way to obtain `&mut T` is
//! [`GhostCell::borrow_mut`], which requires `&mut GhostToken<'brand>`. Since the
//! token is linear, safe code cannot hold overlapping mutable borrows of the
//! same cell, nor a mutable borrow alongside a shared one.

use core::{cell::UnsafeCell, marker::PhantomData, mem};

use crate::GhostToken;

/// A branded cell that can only be accessed using a token of the same brand.
#[repr(transparent)]
pub struct GhostCell<'brand, T: ?Sized> {
    _brand: PhantomData<&'brand mut ()>,
    value: UnsafeCell<T>,
}

impl<'brand, T> GhostCell<'brand, T> {
    /// Creates a new `GhostCell`.
    pub const fn new(value: T) -> Self {
        Self {
            _brand: PhantomData,
            value: UnsafeCell::new(value),
        }
    }

    /// Consumes the cell and returns the contained value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Replaces the contained value, returning the old value.
    #[inline]
    pub fn replace(&self, token: &mut GhostToken<'brand>, value: T) -> T {
        mem::replace(self.borrow_mut(token), value)
    }
}

impl<'brand, T: ?Sized> GhostCell<'brand, T> {
    /// Borrows the cell immutably.
    #[inline(always)]
    pub fn borrow<'a>(&'a self, _token: &'a GhostToken<'brand>) -> &'a T {
        // SAFETY: safe code cannot obtain `&mut T` without `&mut GhostToken<'brand>`,
        // which cannot coexist with the shared token borrow held here.
        unsafe { &*self.value.get() }
    }

    /// Borrows the cell mutably.
    #[inline(always)]
    pub fn borrow_mut<'a>(&'a self, _token: &'a mut GhostToken<'brand>) -> &'a mut T {
        // SAFETY: caller proves exclusivity via `&mut GhostToken<'brand>`.
        unsafe { &mut *self.value.get() }
    }

    /// Returns a mutable reference through exclusive ownership of the cell.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<'brand, T: Default> Default for GhostCell<'brand, T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<'brand, T> From<T> for GhostCell<'brand, T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// SAFETY: sending the cell by value does not grant access to the interior;
// access still requires the branded token.
unsafe impl<'brand, T: ?Sized + Send> Send for GhostCell<'brand, T> {}
// SAFETY: the only safe shared access yields `&T`, which is thread-safe iff `T: Sync`.
unsafe impl<'brand, T: ?Sized + Send + Sync> Sync for GhostCell<'brand, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_and_replace_through_token() {
        GhostToken::new(|mut token| {
            let cell = GhostCell::new(vec![1, 2]);
            cell.borrow_mut(&mut token).push(3);
            assert_eq!(cell.borrow(&token), &vec![1, 2, 3]);

            let old = cell.replace(&mut token, Vec::new());
            assert_eq!(old, vec![1, 2, 3]);
            assert!(cell.borrow(&token).is_empty());
        });
    }

    #[test]
    fn get_mut_and_into_inner_need_no_token() {
        let mut cell: GhostCell<'_, u8> = GhostCell::default();
        *cell.get_mut() = 7;
        assert_eq!(cell.into_inner(), 7);
    }
}
