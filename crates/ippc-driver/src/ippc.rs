// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Marshaling helpers on top of [`RemoteProcess`].
//!
//! Each helper does one step of a remote call: put bytes or a block into
//! the target, start an entry point, collect the outcome word, pull bytes
//! back out, and free what the driver allocated.

use crate::{DriverError, RemoteProcess};
use ippc_abi::{ParameterBlock, Procedure, RESULT_BLOCK_SIZE, RawOutcome, ResultBlock, Vaddr};
use std::time::Duration;

/// An allocation the driver made in the target and must free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoteAlloc {
    addr: Vaddr,
    len: usize,
}

impl RemoteAlloc {
    /// Start of the allocation (target address space).
    #[inline]
    #[must_use]
    pub const fn addr(&self) -> Vaddr {
        self.addr
    }

    /// Bytes allocated.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a zero-byte allocation.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A driver bound to one target process.
pub struct Ippc<P> {
    pub(crate) process: P,
    wait_timeout: Duration,
}

impl<P: RemoteProcess> Ippc<P> {
    /// Drive `process`, waiting at most `wait_timeout` for each outcome.
    pub const fn new(process: P, wait_timeout: Duration) -> Self {
        Self {
            process,
            wait_timeout,
        }
    }

    /// The target process.
    pub const fn process(&self) -> &P {
        &self.process
    }

    /// The outcome wait used by [`wait_outcome`](Self::wait_outcome).
    pub const fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Copy `bytes` into a fresh allocation in the target.
    pub fn write_byte_array(&self, bytes: &[u8]) -> Result<RemoteAlloc, DriverError> {
        let alloc = RemoteAlloc {
            addr: self.process.allocate(bytes.len())?,
            len: bytes.len(),
        };
        if let Err(e) = self.process.write(alloc.addr, bytes) {
            self.discard(alloc);
            return Err(e);
        }
        tracing::trace!(addr = %alloc.addr, len = alloc.len, "wrote byte array");
        Ok(alloc)
    }

    /// Copy ASCII `text` plus a terminator into the target.
    ///
    /// The allocation is one byte longer than `text`.
    pub fn write_string(&self, text: &str) -> Result<RemoteAlloc, DriverError> {
        let bytes = text.as_bytes();
        if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(DriverError::NonAscii {
                byte: bytes[offset],
                offset,
            });
        }
        let mut terminated = Vec::with_capacity(bytes.len() + 1);
        terminated.extend_from_slice(bytes);
        terminated.push(0);
        self.write_byte_array(&terminated)
    }

    /// Encode `block` into a fresh allocation in the target.
    pub fn write_parameter_block(&self, block: ParameterBlock) -> Result<RemoteAlloc, DriverError> {
        self.write_byte_array(&block.to_bytes())
    }

    /// Read and validate the result block at `addr`.
    pub fn read_result_block(&self, addr: Vaddr) -> Result<ResultBlock, DriverError> {
        let raw = self.process.read(addr, RESULT_BLOCK_SIZE)?;
        ResultBlock::from_bytes(&raw).map_err(|reason| DriverError::Malformed { addr, reason })
    }

    /// Read a terminated string at `addr`, giving up after `limit` bytes.
    ///
    /// Bytes that are not valid UTF-8 are replaced.
    pub fn read_c_string(&self, addr: Vaddr, limit: usize) -> Result<String, DriverError> {
        let mut bytes = Vec::new();
        for offset in 0..limit {
            let byte = self.process.read(addr.add(offset as u64), 1)?;
            match byte.first() {
                Some(0) => return Ok(String::from_utf8_lossy(&bytes).into_owned()),
                Some(&b) => bytes.push(b),
                None => break,
            }
        }
        Err(DriverError::Unterminated { addr, limit })
    }

    /// Read exactly `len` bytes at `addr` as text.
    ///
    /// Bytes that are not valid UTF-8 are replaced.
    pub fn read_string(&self, addr: Vaddr, len: usize) -> Result<String, DriverError> {
        let bytes = self.process.read(addr, len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Look up `procedure` in the target's exports.
    pub fn resolve(&self, procedure: Procedure) -> Result<Vaddr, DriverError> {
        self.process
            .resolve(procedure.name())
            .ok_or_else(|| DriverError::UnknownExport(procedure.name().to_owned()))
    }

    /// Start a thread in the target on `entry`.
    pub fn run(&self, entry: Vaddr, argument: Vaddr) -> Result<P::Thread, DriverError> {
        self.process.start(entry, argument)
    }

    /// Wait for `thread` and return its outcome word.
    pub fn wait_outcome(&self, thread: P::Thread) -> Result<RawOutcome, DriverError> {
        self.process.join(thread, self.wait_timeout)
    }

    /// Resolve, start and wait for `procedure`.
    pub fn invoke(&self, procedure: Procedure, argument: Vaddr) -> Result<RawOutcome, DriverError> {
        let entry = self.resolve(procedure)?;
        let thread = self.run(entry, argument)?;
        let outcome = self.wait_outcome(thread)?;
        tracing::debug!(%procedure, ?outcome, "outcome received");
        Ok(outcome)
    }

    /// Free an allocation made by one of the `write_*` helpers.
    pub fn free(&self, alloc: RemoteAlloc) -> Result<(), DriverError> {
        self.process.free(alloc.addr, alloc.len)
    }

    /// Free `alloc` on an error path, where a second error has nowhere to go.
    pub(crate) fn discard(&self, alloc: RemoteAlloc) {
        if let Err(e) = self.free(alloc) {
            tracing::warn!(addr = %alloc.addr, error = %e, "failed to free remote allocation");
        }
    }
}
