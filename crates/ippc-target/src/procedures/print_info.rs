// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `PrintInfo`: print a caller-supplied byte run.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::space::AddressSpace;
use core::ffi::CStr;
use ippc_abi::{CallError, PARAMETER_BLOCK_SIZE, ParameterBlock, Reply, Vaddr};

/// Decode the `ParameterBlock` at `param` and emit its bytes as text.
///
/// The bytes are copied into a local buffer one byte longer than the run,
/// terminated, and read as a C string: the text ends at the first NUL.
/// Invalid UTF-8 is replaced rather than rejected.
///
/// Nothing is emitted unless the call succeeds.
///
/// # Errors
///
/// - [`CallError::NullParameter`] if `param` is null
/// - [`CallError::Unreadable`] if the block or its byte run is not readable
/// - [`CallError::Malformed`] if the block fails validation
pub fn print_info<S, D>(space: &S, sink: &mut D, param: Vaddr) -> Result<Reply, CallError>
where
    S: AddressSpace + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    if param.is_null() {
        return Err(CallError::NullParameter);
    }

    let block = ParameterBlock::from_bytes(space.read(param, PARAMETER_BLOCK_SIZE)?)?;
    let run = space.read(block.data(), block.length())?;

    let mut local = Vec::with_capacity(block.length() + 1);
    local.extend_from_slice(run);
    local.push(0);

    let text = CStr::from_bytes_until_nul(&local)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(%param, len = block.length(), "PrintInfo decoded parameter block");
    sink.emit(Diagnostic::TextReceived(text));

    Ok(Reply::Flag(true))
}
