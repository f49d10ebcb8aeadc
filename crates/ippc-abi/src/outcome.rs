// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Outcome word and its tagged in-memory form.
//!
//! The only channel back from a remote invocation is one machine word: the
//! exit code of the thread that ran the procedure. The word carries no type
//! tag. Inside both processes the outcome is handled as
//! `Result<Reply, CallError>` and only flattened to a [`RawOutcome`] at the
//! literal boundary.

use crate::block::DecodeError;
use crate::procedure::ResultConvention;
use crate::Vaddr;
use core::fmt;

#[cfg(test)]
mod outcome_test;

// =============================================================================
// Raw Outcome
// =============================================================================

/// The single word left behind by an invocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RawOutcome(u64);

impl RawOutcome {
    /// The failure word shared by every procedure.
    pub const FAILURE: Self = Self(0);

    /// The success word of boolean procedures.
    pub const SUCCESS: Self = Self(1);

    /// Wrap a raw outcome word.
    #[inline]
    #[must_use]
    pub const fn new(word: u64) -> Self {
        Self(word)
    }

    /// Get the raw word.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true if this is the failure word.
    #[inline]
    #[must_use]
    pub const fn is_failure(self) -> bool {
        self.0 == 0
    }

    /// Flatten a tagged result into the legacy word.
    ///
    /// Every error collapses to [`FAILURE`](Self::FAILURE); the reason is lost.
    #[must_use]
    pub const fn flatten(result: Result<Reply, CallError>) -> Self {
        match result {
            Ok(reply) => reply.to_outcome(),
            Err(_) => Self::FAILURE,
        }
    }

    /// Interpret this word according to the invoked procedure's convention.
    ///
    /// A zero word on a pointer-returning procedure yields
    /// [`CallError::Failed`]: the caller cannot learn why.
    pub const fn interpret(self, convention: ResultConvention) -> Result<Reply, CallError> {
        match convention {
            ResultConvention::Boolean => match self.0 {
                0 => Ok(Reply::Flag(false)),
                1 => Ok(Reply::Flag(true)),
                other => Err(CallError::UnexpectedOutcome(other)),
            },
            ResultConvention::BlockPointer => match self.0 {
                0 => Err(CallError::Failed),
                addr => Ok(Reply::Block(Vaddr::new(addr))),
            },
        }
    }
}

impl fmt::Debug for RawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawOutcome({:#x})", self.0)
    }
}

// =============================================================================
// Tagged Reply
// =============================================================================

/// Successful, tagged outcome of a procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Boolean procedures.
    Flag(bool),
    /// Address of a `ResultBlock` now owned by the driver.
    Block(Vaddr),
}

impl Reply {
    /// Flatten into the legacy outcome word.
    #[must_use]
    pub const fn to_outcome(self) -> RawOutcome {
        match self {
            Self::Flag(true) => RawOutcome::SUCCESS,
            Self::Flag(false) => RawOutcome::FAILURE,
            Self::Block(addr) => RawOutcome::new(addr.as_u64()),
        }
    }
}

// =============================================================================
// Error Type
// =============================================================================

/// Reason a call did not produce a reply.
///
/// The first four variants are detected by the target; on the wire they all
/// become the zero word. The last two are what a driver can observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallError {
    /// The argument address was null.
    NullParameter,
    /// The parameter block failed validation.
    Malformed(DecodeError),
    /// A referenced range is not readable in the target's address space.
    Unreadable,
    /// The target could not allocate a result.
    OutOfMemory,
    /// The outcome word was zero.
    Failed,
    /// A boolean procedure left a word other than `0` or `1`.
    UnexpectedOutcome(u64),
}

impl From<DecodeError> for CallError {
    fn from(e: DecodeError) -> Self {
        Self::Malformed(e)
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullParameter => write!(f, "null parameter address"),
            Self::Malformed(e) => write!(f, "malformed parameter block: {e}"),
            Self::Unreadable => write!(f, "referenced memory is not readable"),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::Failed => write!(f, "procedure returned zero"),
            Self::UnexpectedOutcome(word) => write!(f, "unexpected outcome word {word:#x}"),
        }
    }
}
