// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `GetInformation`: hand a freshly allocated result block to the driver.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::rng::SharedRng;
use crate::space::AddressSpace;
use ippc_abi::{CallError, INFORMATION_TEXT, RESULT_BLOCK_SIZE, Reply, ResultBlock, Vaddr};

/// Allocate and fill a `ResultBlock` holding [`INFORMATION_TEXT`] and a
/// pseudo-random auxiliary value.
///
/// The argument is ignored. On success the block and its text buffer belong
/// to the driver; this function keeps no reference to either. The text
/// buffer holds exactly `data_length` bytes with no terminator.
///
/// # Errors
///
/// Returns [`CallError::OutOfMemory`] if either allocation fails. Nothing is
/// leaked and nothing is emitted in that case.
pub fn get_information<S, D>(
    space: &mut S,
    sink: &mut D,
    rng: &SharedRng,
    _param: Vaddr,
) -> Result<Reply, CallError>
where
    S: AddressSpace + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    let block_addr = space.allocate(RESULT_BLOCK_SIZE)?;

    match fill(space, rng, block_addr) {
        Ok(value) => {
            sink.emit(Diagnostic::AuxiliaryValue(value));
            Ok(Reply::Block(block_addr))
        }
        Err(e) => {
            discard(space, block_addr, RESULT_BLOCK_SIZE);
            Err(e)
        }
    }
}

/// Allocate the text buffer and write both blocks. Returns the auxiliary value.
fn fill<S>(space: &mut S, rng: &SharedRng, block_addr: Vaddr) -> Result<i32, CallError>
where
    S: AddressSpace + ?Sized,
{
    let text = INFORMATION_TEXT.as_bytes();
    let data = space.allocate(text.len())?;
    let value = rng.next_value();

    let written = ResultBlock::new(data, text.len(), value)
        .ok_or(CallError::OutOfMemory)
        .and_then(|block| {
            space.write(data, text)?;
            space.write(block_addr, &block.to_bytes())?;
            Ok(value)
        });

    if written.is_err() {
        discard(space, data, text.len());
    }
    written
}

fn discard<S>(space: &mut S, addr: Vaddr, len: usize)
where
    S: AddressSpace + ?Sized,
{
    if let Err(e) = space.release(addr, len) {
        tracing::warn!(%addr, len, error = %e, "failed to release partial result");
    }
}
