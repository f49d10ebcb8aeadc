// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The current process's own memory.
//!
//! This is the address space the exported `extern "C"` procedures run in.
//! There is no registry of valid ranges: the driver that wrote the parameter
//! block is trusted to have made its addresses readable before starting the
//! invocation.

#![allow(unsafe_code)] // Dereferences caller-supplied addresses

use super::{ALLOC_ALIGN, AddressSpace, SpaceError};
use ippc_abi::Vaddr;
use std::alloc::{Layout, alloc_zeroed, dealloc};

/// Direct access to the memory of the running process.
///
/// Allocations come from the global allocator and are never freed
/// implicitly, so they survive the thread that made them.
#[derive(Debug)]
pub struct LocalSpace {
    _private: (),
}

impl LocalSpace {
    /// Create a handle to the current process's memory.
    ///
    /// # Safety
    ///
    /// For as long as this handle is used, every non-null address passed to
    /// [`read`](AddressSpace::read) or [`write`](AddressSpace::write) must be
    /// valid for that many bytes, and every address passed to
    /// [`release`](AddressSpace::release) must come from
    /// [`allocate`](AddressSpace::allocate) with the same length and must not
    /// have been released already.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn layout(len: usize) -> Result<Layout, SpaceError> {
        Layout::from_size_align(len.max(1), ALLOC_ALIGN)
            .map_err(|_| SpaceError::OutOfMemory { requested: len })
    }
}

impl AddressSpace for LocalSpace {
    fn read(&self, addr: Vaddr, len: usize) -> Result<&[u8], SpaceError> {
        if len == 0 {
            return Ok(&[]);
        }
        if addr.is_null() {
            return Err(SpaceError::Unmapped { addr, len });
        }
        // SAFETY: the constructor's contract makes `len` bytes at `addr` readable.
        Ok(unsafe { core::slice::from_raw_parts(addr.as_ptr::<u8>(), len) })
    }

    fn write(&mut self, addr: Vaddr, bytes: &[u8]) -> Result<(), SpaceError> {
        if bytes.is_empty() {
            return Ok(());
        }
        if addr.is_null() {
            return Err(SpaceError::Unmapped {
                addr,
                len: bytes.len(),
            });
        }
        // SAFETY: the constructor's contract makes the destination writable,
        // and it cannot overlap a borrowed source slice.
        unsafe {
            core::ptr::copy_nonoverlapping(bytes.as_ptr(), addr.as_mut_ptr::<u8>(), bytes.len());
        }
        Ok(())
    }

    fn allocate(&mut self, len: usize) -> Result<Vaddr, SpaceError> {
        let layout = Self::layout(len)?;
        // SAFETY: the layout has a non-zero size.
        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            return Err(SpaceError::OutOfMemory { requested: len });
        }
        Ok(Vaddr::from_ptr(ptr))
    }

    fn release(&mut self, addr: Vaddr, len: usize) -> Result<(), SpaceError> {
        if addr.is_null() {
            return Err(SpaceError::NotAllocated(addr));
        }
        let layout = Self::layout(len)?;
        // SAFETY: the constructor's contract ties `addr` to an `allocate(len)`
        // call, which used this same layout.
        unsafe { dealloc(addr.as_mut_ptr::<u8>(), layout) };
        Ok(())
    }
}
