// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared calling-convention definitions between an IPPC driver and its target.
//!
//! This crate defines the contract between the process that starts a remote
//! invocation (the driver) and the process that exports the procedure (the
//! target):
//! - The opaque address type used for every embedded pointer
//! - Byte layouts of the parameter and result blocks
//! - The exported procedure table and each entry's result convention
//! - The single-word outcome and its tagged in-memory counterpart
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **Explicit layout**: Blocks are encoded little-endian with fixed offsets,
//!   and validated on decode instead of being trusted
//! - **64-bit addresses**: Every address field is 8 bytes wide
//!
//! # Modules
//!
//! - [`types`]: The `Vaddr` address type
//! - [`block`]: `ParameterBlock` and `ResultBlock` codecs
//! - [`procedure`]: Exported procedure names and conventions
//! - [`outcome`]: Outcome word, tagged replies, and call errors

#![no_std]

#[cfg(test)]
extern crate std;

pub mod block;
pub mod outcome;
pub mod procedure;
pub mod types;

// Re-export commonly used types at crate root
pub use block::{DecodeError, PARAMETER_BLOCK_SIZE, ParameterBlock, RESULT_BLOCK_SIZE, ResultBlock};
pub use outcome::{CallError, RawOutcome, Reply};
pub use procedure::{INFORMATION_TEXT, Procedure, RAND_MAX, ResultConvention};
pub use types::Vaddr;
