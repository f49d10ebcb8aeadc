// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Driver error type.

use ippc_abi::{DecodeError, Procedure, RawOutcome, Vaddr};
use ippc_target::SpaceError;
use std::time::Duration;

/// Errors seen by the driver while staging, invoking, or collecting a call.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The target exports no procedure of this name.
    #[error("target does not export {0:?}")]
    UnknownExport(String),

    /// Access to the target's memory failed.
    #[error("remote memory: {0}")]
    Space(#[from] SpaceError),

    /// Text for the target must be ASCII.
    #[error("non-ASCII byte {byte:#04x} at offset {offset}")]
    NonAscii {
        /// Offending byte.
        byte: u8,
        /// Its position in the text.
        offset: usize,
    },

    /// A byte run longer than a length field can describe.
    #[error("{0} bytes do not fit a length field")]
    TooLong(usize),

    /// The target handed out the null address for a non-empty allocation.
    #[error("target returned a null address for {0} bytes")]
    NullAllocation(usize),

    /// A block read back from the target failed validation.
    #[error("malformed block at {addr}: {reason}")]
    Malformed {
        /// Where the block was read.
        addr: Vaddr,
        /// What was wrong with it.
        reason: DecodeError,
    },

    /// A string in the target has no terminator within the read limit.
    #[error("no terminator within {limit} bytes at {addr}")]
    Unterminated {
        /// Start of the string.
        addr: Vaddr,
        /// Bytes searched.
        limit: usize,
    },

    /// The procedure reported failure through its outcome word.
    #[error("{procedure} failed with {outcome:?}")]
    ProcedureFailed {
        /// Procedure that was invoked.
        procedure: Procedure,
        /// The word it left behind.
        outcome: RawOutcome,
    },

    /// The invocation thread could not be started.
    #[error("failed to start invocation thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The invocation thread did not finish in time.
    #[error("no outcome within {0:?}")]
    Timeout(Duration),

    /// The invocation thread ended without leaving an outcome.
    #[error("invocation thread terminated abnormally")]
    ThreadLost,

    /// The target's state was poisoned by a panicking invocation.
    #[error("target state poisoned")]
    Poisoned,

    /// An environment variable held an unusable value.
    #[error("invalid value {value:?} for {name}")]
    Config {
        /// Variable name.
        name: &'static str,
        /// Value found.
        value: String,
    },
}
