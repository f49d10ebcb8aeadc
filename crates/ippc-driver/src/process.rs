// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The primitives a driver needs from another process.

use crate::DriverError;
use ippc_abi::{RawOutcome, Vaddr};
use std::time::Duration;

/// Another process, seen from the driver.
///
/// Addresses passed in and handed out are only meaningful inside that
/// process. Allocations made here belong to the driver until it frees them.
pub trait RemoteProcess {
    /// Handle to a started unit of execution.
    type Thread;

    /// Allocate `len` bytes in the process.
    fn allocate(&self, len: usize) -> Result<Vaddr, DriverError>;

    /// Copy `bytes` into the process at `addr`.
    fn write(&self, addr: Vaddr, bytes: &[u8]) -> Result<(), DriverError>;

    /// Copy `len` bytes at `addr` out of the process.
    fn read(&self, addr: Vaddr, len: usize) -> Result<Vec<u8>, DriverError>;

    /// Free an allocation of `len` bytes at `addr`.
    fn free(&self, addr: Vaddr, len: usize) -> Result<(), DriverError>;

    /// Look up the entry address of an exported procedure.
    fn resolve(&self, name: &str) -> Option<Vaddr>;

    /// Start a thread on `entry` with `argument` as its only parameter.
    fn start(&self, entry: Vaddr, argument: Vaddr) -> Result<Self::Thread, DriverError>;

    /// Wait up to `timeout` for `thread` to finish and return its exit code.
    fn join(&self, thread: Self::Thread, timeout: Duration) -> Result<RawOutcome, DriverError>;
}
