// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address type for pointers embedded in blocks and outcomes.
//!
//! An address is only meaningful inside the address space that dereferences
//! it. Nothing in this crate ever dereferences one.

use core::fmt;

/// An address in the memory of one particular process.
///
/// Addresses crossing the call boundary are opaque handles:
/// - The driver writes them into parameter blocks for the target
/// - The target returns them (inside result blocks or the outcome word)
/// - Only the owning address space may resolve them into memory
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Vaddr(u64);

impl Vaddr {
    /// Wrap a raw 64-bit address.
    #[inline]
    #[must_use]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// The zero address, used for "no argument" and "no result".
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Self(0)
    }

    /// True for the zero address.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// The address as it travels on the wire.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Reinterpret as a pointer into the current process.
    ///
    /// Only sound to dereference when this process owns the address.
    #[inline]
    #[must_use]
    pub const fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    /// Mutable counterpart of [`Vaddr::as_ptr`].
    #[inline]
    #[must_use]
    pub const fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    /// Take the address of a pointer in the current process.
    #[inline]
    #[must_use]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as u64)
    }

    /// Step `offset` bytes forward, wrapping at the top of the range.
    #[inline]
    #[must_use]
    pub const fn add(self, offset: u64) -> Self {
        Self(self.0.wrapping_add(offset))
    }

    /// Step `offset` bytes forward, or `None` past the top of the range.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Byte distance from `other` up to `self`.
    #[inline]
    #[must_use]
    pub const fn diff(self, other: Self) -> u64 {
        self.0.wrapping_sub(other.0)
    }
}

impl fmt::Debug for Vaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vaddr({:#x})", self.0)
    }
}

impl fmt::Display for Vaddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
