// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Address space abstraction.
//!
//! Procedures never dereference an address directly. Every access goes
//! through [`AddressSpace`], which either checks the range against known
//! allocations (`MockSpace`) or trusts the caller's contract (`LocalSpace`).
//!
//! - `mock` - Simulated address space backed by a heap buffer
//! - `local` - The current process's own memory

mod local;
mod mock;


pub use local::LocalSpace;
pub use mock::{AllocStats, MockSpace};

use ippc_abi::{CallError, Vaddr};

/// Alignment of every allocation handed out by an address space.
pub const ALLOC_ALIGN: usize = 16;

/// Errors from address space operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpaceError {
    /// The range is not backed by a live allocation.
    #[error("{len} bytes at {addr} are not mapped")]
    Unmapped {
        /// Start of the range.
        addr: Vaddr,
        /// Length of the range.
        len: usize,
    },
    /// No room left for an allocation of this size.
    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory {
        /// Requested size in bytes.
        requested: usize,
    },
    /// Release of an address that is not the start of a live allocation.
    #[error("{0} is not a live allocation")]
    NotAllocated(Vaddr),
    /// Release with a length that differs from the allocation's.
    #[error("allocation at {addr} is {actual} bytes, release asked for {expected}")]
    SizeMismatch {
        /// Start of the allocation.
        addr: Vaddr,
        /// Length given to release.
        expected: usize,
        /// Length recorded at allocation time.
        actual: usize,
    },
}

impl From<SpaceError> for CallError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::OutOfMemory { .. } => Self::OutOfMemory,
            SpaceError::Unmapped { .. }
            | SpaceError::NotAllocated(_)
            | SpaceError::SizeMismatch { .. } => Self::Unreadable,
        }
    }
}

/// A process address space, seen from inside that process.
///
/// Allocations made through [`allocate`](Self::allocate) survive the unit
/// of execution that made them. They stay valid until someone calls
/// [`release`](Self::release) with the same address and length.
pub trait AddressSpace {
    /// Borrow `len` readable bytes at `addr`.
    ///
    /// A zero-length read always succeeds, even at the null address.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Unmapped`] if the range is not readable.
    fn read(&self, addr: Vaddr, len: usize) -> Result<&[u8], SpaceError>;

    /// Copy `bytes` into memory at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Unmapped`] if the range is not writable.
    fn write(&mut self, addr: Vaddr, bytes: &[u8]) -> Result<(), SpaceError>;

    /// Allocate `len` bytes that outlive the current invocation.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::OutOfMemory`] if the allocation cannot be made.
    fn allocate(&mut self, len: usize) -> Result<Vaddr, SpaceError>;

    /// Release an allocation made by [`allocate`](Self::allocate).
    ///
    /// # Errors
    ///
    /// Returns an error if `addr` is not a live allocation of `len` bytes.
    fn release(&mut self, addr: Vaddr, len: usize) -> Result<(), SpaceError>;
}
