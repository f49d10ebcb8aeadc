// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The literal boundary: `extern "C"` entry points.
//!
//! These are the symbols a driver resolves in the loaded image and starts a
//! remote thread on. Each takes the thread's single pointer argument and
//! returns one word, which becomes the thread's exit code. Everything inside
//! works with tagged results; only the return statement flattens.
//!
//! The procedures run against [`LocalSpace`], log through [`TracingSink`],
//! and share one process-wide generator.

#![allow(unsafe_code)] // C ABI entry points dereference the caller's pointers
#![allow(non_snake_case)] // Exported symbol names are fixed by the convention

use crate::diag::TracingSink;
use crate::procedures;
use crate::rng::SharedRng;
use crate::space::{AddressSpace, LocalSpace};
use core::ffi::c_void;
use ippc_abi::{RESULT_BLOCK_SIZE, RawOutcome, ResultBlock, Vaddr};

/// The generator behind every `GetInformation` call in this process.
static GENERATOR: SharedRng = SharedRng::new(SharedRng::DEFAULT_SEED);

/// Restart this process's generator from `seed`.
pub fn seed_generator(seed: u32) {
    GENERATOR.reseed(seed);
}

fn word(outcome: RawOutcome) -> usize {
    usize::try_from(outcome.as_u64()).unwrap_or(0)
}

/// Print the byte run described by the `ParameterBlock` at `param`.
///
/// Returns `1` on success and `0` on failure.
///
/// # Safety
///
/// `param` must be null or point to a readable parameter block whose byte
/// run is readable for its stated length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn PrintInfo(param: *mut c_void) -> usize {
    // SAFETY: forwarded from this function's contract.
    let space = unsafe { LocalSpace::new() };
    let result = procedures::print_info(&space, &mut TracingSink, Vaddr::from_ptr(param));
    word(RawOutcome::flatten(result))
}

/// Allocate a `ResultBlock` and return its address, or `0` on failure.
///
/// The argument is ignored. The caller owns the returned block and must
/// release it, for example through [`LocalResult`].
///
/// # Safety
///
/// Always safe to call; `unsafe` only because it is a C entry point that
/// hands out ownership of raw memory.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetInformation(param: *mut c_void) -> usize {
    // SAFETY: this procedure only touches memory it allocates itself.
    let mut space = unsafe { LocalSpace::new() };
    let result = procedures::get_information(
        &mut space,
        &mut TracingSink,
        &GENERATOR,
        Vaddr::from_ptr(param),
    );
    word(RawOutcome::flatten(result))
}

/// Owned result of an in-process `GetInformation` call.
///
/// Move-only: dropping it releases both the block and its text buffer,
/// exactly once.
#[derive(Debug)]
pub struct LocalResult {
    addr: Vaddr,
    block: ResultBlock,
}

impl LocalResult {
    /// Take ownership of the block behind a `GetInformation` outcome word.
    ///
    /// Returns `None` for the failure word.
    ///
    /// # Safety
    ///
    /// `outcome` must be a word returned by [`GetInformation`] in this
    /// process that nobody else has taken ownership of.
    #[must_use]
    pub unsafe fn from_outcome(outcome: usize) -> Option<Self> {
        let addr = Vaddr::new(outcome as u64);
        if addr.is_null() {
            return None;
        }
        // SAFETY: `addr` is a live result block per this function's contract.
        let space = unsafe { LocalSpace::new() };
        let raw = space.read(addr, RESULT_BLOCK_SIZE).ok()?;
        let block = ResultBlock::from_bytes(raw).ok()?;
        Some(Self { addr, block })
    }

    /// The returned bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        if self.block.data_length() == 0 {
            return &[];
        }
        // SAFETY: the text buffer is owned by `self` and freed only on drop.
        unsafe {
            core::slice::from_raw_parts(self.block.data().as_ptr::<u8>(), self.block.data_length())
        }
    }

    /// The returned auxiliary value.
    #[must_use]
    pub const fn auxiliary_value(&self) -> i32 {
        self.block.auxiliary_value()
    }
}

impl Drop for LocalResult {
    fn drop(&mut self) {
        // SAFETY: both allocations are owned by `self` and released only here.
        let mut space = unsafe { LocalSpace::new() };
        let released = space
            .release(self.block.data(), self.block.data_length())
            .and_then(|()| space.release(self.addr, RESULT_BLOCK_SIZE));
        if let Err(e) = released {
            tracing::warn!(addr = %self.addr, error = %e, "failed to release local result");
        }
    }
}
