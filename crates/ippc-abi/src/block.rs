// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Parameter and result block layouts.
//!
//! Both blocks are fixed-size records exchanged by address. The byte layout
//! below is the contract; the in-memory structs only hold validated values.
//! All fields are little-endian.
//!
//! # `ParameterBlock` (driver → target, read by `PrintInfo`)
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 8 | `data` address (target address space) |
//! | 8 | 4 | `length` (i32, must be >= 0) |
//! | 12 | 4 | padding (written as zero, ignored on decode) |
//!
//! # `ResultBlock` (target → driver, produced by `GetInformation`)
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 8 | `data` address (target address space) |
//! | 8 | 4 | `data_length` (i32, must be >= 0) |
//! | 12 | 4 | `auxiliary_value` (i32) |

use crate::Vaddr;
use core::fmt;

#[cfg(test)]
mod block_test;

/// Encoded size of a [`ParameterBlock`] in bytes.
pub const PARAMETER_BLOCK_SIZE: usize = 16;

/// Encoded size of a [`ResultBlock`] in bytes.
pub const RESULT_BLOCK_SIZE: usize = 16;

/// Largest byte count a length field can carry.
pub const MAX_LENGTH: usize = i32::MAX as usize;

// =============================================================================
// Decode Errors
// =============================================================================

/// Reason a block failed validation on decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the block layout requires.
    Truncated {
        /// Bytes the layout requires.
        needed: usize,
        /// Bytes actually available.
        actual: usize,
    },
    /// The length field was negative.
    NegativeLength(i32),
    /// The data address was null while the length was non-zero.
    NullData,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, actual } => {
                write!(f, "block truncated: need {needed} bytes, have {actual}")
            }
            Self::NegativeLength(len) => write!(f, "negative length field: {len}"),
            Self::NullData => write!(f, "null data address with non-zero length"),
        }
    }
}

// =============================================================================
// Field Helpers
// =============================================================================

const fn le_u64(raw: &[u8; 16], at: usize) -> u64 {
    u64::from_le_bytes([
        raw[at],
        raw[at + 1],
        raw[at + 2],
        raw[at + 3],
        raw[at + 4],
        raw[at + 5],
        raw[at + 6],
        raw[at + 7],
    ])
}

const fn le_i32(raw: &[u8; 16], at: usize) -> i32 {
    i32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

/// Take the fixed-size head of `bytes` or report how short it is.
const fn head(bytes: &[u8]) -> Result<&[u8; 16], DecodeError> {
    match bytes.first_chunk::<16>() {
        Some(raw) => Ok(raw),
        None => Err(DecodeError::Truncated {
            needed: 16,
            actual: bytes.len(),
        }),
    }
}

/// Validate an (address, length) pair read off the wire.
const fn checked_span(data: Vaddr, length: i32) -> Result<u32, DecodeError> {
    if length < 0 {
        return Err(DecodeError::NegativeLength(length));
    }
    if data.is_null() && length != 0 {
        return Err(DecodeError::NullData);
    }
    Ok(length.unsigned_abs())
}

// =============================================================================
// Parameter Block
// =============================================================================

/// Parameters for `PrintInfo`: a byte run living in the target's memory.
///
/// The driver copies the bytes into the target first, then writes this block
/// next to them and passes the block's address as the procedure argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ParameterBlock {
    data: Vaddr,
    length: u32,
}

impl ParameterBlock {
    /// Create a parameter block describing `length` bytes at `data`.
    ///
    /// Returns `None` if `length` does not fit the signed 32-bit field, or if
    /// `data` is null while `length` is non-zero.
    #[must_use]
    pub const fn new(data: Vaddr, length: usize) -> Option<Self> {
        if length > MAX_LENGTH || (data.is_null() && length != 0) {
            return None;
        }
        Some(Self {
            data,
            length: length as u32,
        })
    }

    /// Address of the byte run (target address space).
    #[inline]
    #[must_use]
    pub const fn data(&self) -> Vaddr {
        self.data
    }

    /// Number of bytes at [`data`](Self::data), excluding any terminator.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Encode into the fixed wire layout.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; PARAMETER_BLOCK_SIZE] {
        let addr = self.data.as_u64().to_le_bytes();
        let len = self.length.to_le_bytes();
        [
            addr[0], addr[1], addr[2], addr[3], addr[4], addr[5], addr[6], addr[7], len[0], len[1],
            len[2], len[3], 0, 0, 0, 0,
        ]
    }

    /// Decode and validate a block from raw bytes.
    ///
    /// Extra trailing bytes are ignored.
    pub const fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw = match head(bytes) {
            Ok(raw) => raw,
            Err(e) => return Err(e),
        };
        let data = Vaddr::new(le_u64(raw, 0));
        match checked_span(data, le_i32(raw, 8)) {
            Ok(length) => Ok(Self { data, length }),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Result Block
// =============================================================================

/// Result of `GetInformation`: returned bytes plus a computed scalar.
///
/// Allocated by the target in its own address space. Once the target hands
/// out the block's address it never touches the block again; the driver owns
/// both the block and the bytes at [`data`](Self::data).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ResultBlock {
    data: Vaddr,
    data_length: u32,
    auxiliary_value: i32,
}

impl ResultBlock {
    /// Create a result block.
    ///
    /// Returns `None` under the same conditions as [`ParameterBlock::new`].
    #[must_use]
    pub const fn new(data: Vaddr, data_length: usize, auxiliary_value: i32) -> Option<Self> {
        if data_length > MAX_LENGTH || (data.is_null() && data_length != 0) {
            return None;
        }
        Some(Self {
            data,
            data_length: data_length as u32,
            auxiliary_value,
        })
    }

    /// Address of the returned bytes (target address space).
    #[inline]
    #[must_use]
    pub const fn data(&self) -> Vaddr {
        self.data
    }

    /// Number of returned bytes.
    #[inline]
    #[must_use]
    pub const fn data_length(&self) -> usize {
        self.data_length as usize
    }

    /// The callee-computed scalar.
    #[inline]
    #[must_use]
    pub const fn auxiliary_value(&self) -> i32 {
        self.auxiliary_value
    }

    /// Encode into the fixed wire layout.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; RESULT_BLOCK_SIZE] {
        let addr = self.data.as_u64().to_le_bytes();
        let len = self.data_length.to_le_bytes();
        let aux = self.auxiliary_value.to_le_bytes();
        [
            addr[0], addr[1], addr[2], addr[3], addr[4], addr[5], addr[6], addr[7], len[0], len[1],
            len[2], len[3], aux[0], aux[1], aux[2], aux[3],
        ]
    }

    /// Decode and validate a block from raw bytes.
    pub const fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw = match head(bytes) {
            Ok(raw) => raw,
            Err(e) => return Err(e),
        };
        let data = Vaddr::new(le_u64(raw, 0));
        match checked_span(data, le_i32(raw, 8)) {
            Ok(data_length) => Ok(Self {
                data,
                data_length,
                auxiliary_value: le_i32(raw, 12),
            }),
            Err(e) => Err(e),
        }
    }
}

// Compile-time verification that the in-memory structs match the wire sizes
const _: () = assert!(core::mem::size_of::<ParameterBlock>() == PARAMETER_BLOCK_SIZE);
const _: () = assert!(core::mem::size_of::<ResultBlock>() == RESULT_BLOCK_SIZE);
