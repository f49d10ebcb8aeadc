// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock address space for testing and loopback targets.
//!
//! This module provides an address space backed by a heap-allocated buffer,
//! allowing both sides of the convention to run inside one test process.
//! Unlike real memory, every access is checked against the set of live
//! allocations, so a stale or foreign address is an error instead of a crash.

use super::{ALLOC_ALIGN, AddressSpace, SpaceError};
use ippc_abi::Vaddr;
use std::collections::BTreeMap;

/// Default base address of a mock space.
pub const DEFAULT_BASE: Vaddr = Vaddr::new(0x4000_0000);

#[derive(Clone, Copy, Debug)]
struct Allocation {
    /// Length requested by the allocator's caller.
    len: usize,
    /// Bytes reserved in the buffer (aligned, never zero).
    span: usize,
}

/// Allocation counters, used for leak detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Allocations currently live.
    pub live_blocks: usize,
    /// Bytes requested by live allocations.
    pub live_bytes: usize,
    /// Highest value `live_bytes` has reached.
    pub peak_bytes: usize,
    /// Allocations made over the space's lifetime.
    pub total_allocations: usize,
    /// Allocations that failed for lack of room.
    pub failed_allocations: usize,
}

/// A simulated address space backed by a heap-allocated buffer.
///
/// The space covers `size` bytes starting at `base`. Allocation is first-fit
/// over the gaps between live allocations, so an address is only ever handed
/// out again after it has been released.
pub struct MockSpace {
    memory: Box<[u8]>,
    base: Vaddr,
    allocations: BTreeMap<usize, Allocation>,
    stats: AllocStats,
}

impl MockSpace {
    /// Create a new mock space with the given size and base address.
    ///
    /// The base should be non-null and aligned to [`ALLOC_ALIGN`] so that no
    /// allocation can ever be the null address.
    #[must_use]
    pub fn new(size: usize, base: Vaddr) -> Self {
        Self {
            memory: vec![0u8; size].into_boxed_slice(),
            base,
            allocations: BTreeMap::new(),
            stats: AllocStats::default(),
        }
    }

    /// Create a mock space of `size` bytes at [`DEFAULT_BASE`].
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self::new(size, DEFAULT_BASE)
    }

    /// Get the base address of this space.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> Vaddr {
        self.base
    }

    /// Get the size of this space in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.memory.len()
    }

    /// Get the allocation counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> AllocStats {
        self.stats
    }

    /// Convert an address to an offset into the backing buffer.
    fn offset(&self, addr: Vaddr) -> Option<usize> {
        let offset = addr.as_u64().checked_sub(self.base.as_u64())?;
        usize::try_from(offset).ok()
    }

    /// Find the buffer range for `len` bytes at `addr` inside one allocation.
    fn range(&self, addr: Vaddr, len: usize) -> Result<core::ops::Range<usize>, SpaceError> {
        let unmapped = SpaceError::Unmapped { addr, len };
        let start = self.offset(addr).ok_or(unmapped)?;
        let end = start.checked_add(len).ok_or(unmapped)?;
        let (&alloc_start, alloc) = self
            .allocations
            .range(..=start)
            .next_back()
            .ok_or(unmapped)?;
        if end > alloc_start + alloc.len {
            return Err(unmapped);
        }
        Ok(start..end)
    }

    /// First-fit search for `span` free bytes.
    ///
    /// Offsets and spans are multiples of [`ALLOC_ALIGN`], so every gap
    /// boundary is aligned.
    fn find_gap(&self, span: usize) -> Option<usize> {
        let mut cursor = 0usize;
        for (&start, alloc) in &self.allocations {
            if start - cursor >= span {
                return Some(cursor);
            }
            cursor = start + alloc.span;
        }
        (self.memory.len().checked_sub(cursor)? >= span).then_some(cursor)
    }
}

impl AddressSpace for MockSpace {
    fn read(&self, addr: Vaddr, len: usize) -> Result<&[u8], SpaceError> {
        if len == 0 {
            return Ok(&[]);
        }
        let range = self.range(addr, len)?;
        Ok(&self.memory[range])
    }

    fn write(&mut self, addr: Vaddr, bytes: &[u8]) -> Result<(), SpaceError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let range = self.range(addr, bytes.len())?;
        self.memory[range].copy_from_slice(bytes);
        Ok(())
    }

    fn allocate(&mut self, len: usize) -> Result<Vaddr, SpaceError> {
        let found = len
            .max(1)
            .checked_next_multiple_of(ALLOC_ALIGN)
            .and_then(|span| Some((span, self.find_gap(span)?)))
            .and_then(|(span, offset)| {
                let addr = self.base.checked_add(offset as u64)?;
                Some((span, offset, addr))
            });
        let Some((span, offset, addr)) = found else {
            self.stats.failed_allocations += 1;
            tracing::debug!(len, "mock space exhausted");
            return Err(SpaceError::OutOfMemory { requested: len });
        };

        // Fresh allocations start zeroed, like newly committed pages
        self.memory[offset..offset + span].fill(0);
        self.allocations.insert(offset, Allocation { len, span });

        self.stats.live_blocks += 1;
        self.stats.live_bytes += len;
        self.stats.peak_bytes = self.stats.peak_bytes.max(self.stats.live_bytes);
        self.stats.total_allocations += 1;

        Ok(addr)
    }

    fn release(&mut self, addr: Vaddr, len: usize) -> Result<(), SpaceError> {
        let offset = self.offset(addr).ok_or(SpaceError::NotAllocated(addr))?;
        let alloc = self
            .allocations
            .get(&offset)
            .copied()
            .ok_or(SpaceError::NotAllocated(addr))?;
        if alloc.len != len {
            return Err(SpaceError::SizeMismatch {
                addr,
                expected: len,
                actual: alloc.len,
            });
        }
        self.allocations.remove(&offset);
        self.stats.live_blocks -= 1;
        self.stats.live_bytes -= len;
        Ok(())
    }
}
