// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for block layouts.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use proptest::prelude::*;

#[test]
fn parameter_block_layout() {
    let block = ParameterBlock::new(Vaddr::new(0x1122_3344_5566_7788), 2).unwrap();
    let bytes = block.to_bytes();

    assert_eq!(&bytes[0..8], &0x1122_3344_5566_7788u64.to_le_bytes());
    assert_eq!(&bytes[8..12], &2i32.to_le_bytes());
    assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
}

#[test]
fn parameter_block_decode() {
    let mut bytes = [0u8; PARAMETER_BLOCK_SIZE];
    bytes[0..8].copy_from_slice(&0x4000_1000u64.to_le_bytes());
    bytes[8..12].copy_from_slice(&5i32.to_le_bytes());

    let block = ParameterBlock::from_bytes(&bytes).unwrap();
    assert_eq!(block.data(), Vaddr::new(0x4000_1000));
    assert_eq!(block.length(), 5);
}

#[test]
fn parameter_block_ignores_padding() {
    let mut bytes = ParameterBlock::new(Vaddr::new(0x10), 1).unwrap().to_bytes();
    bytes[12..16].copy_from_slice(&[0xAA; 4]);

    let block = ParameterBlock::from_bytes(&bytes).unwrap();
    assert_eq!(block.length(), 1);
}

#[test]
fn parameter_block_rejects_negative_length() {
    let mut bytes = [0u8; PARAMETER_BLOCK_SIZE];
    bytes[0..8].copy_from_slice(&0x10u64.to_le_bytes());
    bytes[8..12].copy_from_slice(&(-1i32).to_le_bytes());

    assert_eq!(
        ParameterBlock::from_bytes(&bytes),
        Err(DecodeError::NegativeLength(-1))
    );
}

#[test]
fn parameter_block_rejects_null_data() {
    let mut bytes = [0u8; PARAMETER_BLOCK_SIZE];
    bytes[8..12].copy_from_slice(&3i32.to_le_bytes());

    assert_eq!(ParameterBlock::from_bytes(&bytes), Err(DecodeError::NullData));
    assert!(ParameterBlock::new(Vaddr::null(), 3).is_none());
}

#[test]
fn parameter_block_allows_empty_null_run() {
    let block = ParameterBlock::from_bytes(&[0u8; PARAMETER_BLOCK_SIZE]).unwrap();
    assert!(block.data().is_null());
    assert_eq!(block.length(), 0);
}

#[test]
fn parameter_block_truncated() {
    assert_eq!(
        ParameterBlock::from_bytes(&[0u8; 12]),
        Err(DecodeError::Truncated {
            needed: PARAMETER_BLOCK_SIZE,
            actual: 12
        })
    );
}

#[test]
fn parameter_block_length_limit() {
    assert!(ParameterBlock::new(Vaddr::new(0x10), MAX_LENGTH).is_some());
    assert!(ParameterBlock::new(Vaddr::new(0x10), MAX_LENGTH + 1).is_none());
}

#[test]
fn result_block_layout() {
    let block = ResultBlock::new(Vaddr::new(0x2000), 56, 41).unwrap();
    let bytes = block.to_bytes();

    assert_eq!(&bytes[0..8], &0x2000u64.to_le_bytes());
    assert_eq!(&bytes[8..12], &56i32.to_le_bytes());
    assert_eq!(&bytes[12..16], &41i32.to_le_bytes());

    let decoded = ResultBlock::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, block);
    assert_eq!(decoded.auxiliary_value(), 41);
}

#[test]
fn result_block_rejects_bad_length() {
    let mut bytes = ResultBlock::new(Vaddr::new(0x2000), 1, 0).unwrap().to_bytes();
    bytes[8..12].copy_from_slice(&i32::MIN.to_le_bytes());

    assert_eq!(
        ResultBlock::from_bytes(&bytes),
        Err(DecodeError::NegativeLength(i32::MIN))
    );
}

#[test]
fn struct_sizes_match_wire() {
    assert_eq!(core::mem::size_of::<ParameterBlock>(), PARAMETER_BLOCK_SIZE);
    assert_eq!(core::mem::size_of::<ResultBlock>(), RESULT_BLOCK_SIZE);
}

proptest! {
    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
        let _ = ParameterBlock::from_bytes(&bytes);
        let _ = ResultBlock::from_bytes(&bytes);
    }

    #[test]
    fn decoded_lengths_are_non_negative(addr in 1u64.., len in any::<i32>()) {
        let mut bytes = [0u8; PARAMETER_BLOCK_SIZE];
        bytes[0..8].copy_from_slice(&addr.to_le_bytes());
        bytes[8..12].copy_from_slice(&len.to_le_bytes());

        match ParameterBlock::from_bytes(&bytes) {
            Ok(block) => prop_assert_eq!(i64::try_from(block.length()).unwrap(), i64::from(len)),
            Err(e) => prop_assert_eq!(e, DecodeError::NegativeLength(len)),
        }
    }
}
