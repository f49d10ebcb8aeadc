// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for outcome words.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::Procedure;
use std::format;

#[test]
fn boolean_outcomes() {
    let convention = Procedure::PrintInfo.convention();

    assert_eq!(
        RawOutcome::SUCCESS.interpret(convention),
        Ok(Reply::Flag(true))
    );
    assert_eq!(
        RawOutcome::FAILURE.interpret(convention),
        Ok(Reply::Flag(false))
    );
    assert_eq!(
        RawOutcome::new(2).interpret(convention),
        Err(CallError::UnexpectedOutcome(2))
    );
}

#[test]
fn pointer_outcomes() {
    let convention = Procedure::GetInformation.convention();

    assert_eq!(
        RawOutcome::FAILURE.interpret(convention),
        Err(CallError::Failed)
    );
    assert_eq!(
        RawOutcome::new(0x4000_0010).interpret(convention),
        Ok(Reply::Block(Vaddr::new(0x4000_0010)))
    );
    // A pointer that happens to equal one is still a pointer
    assert_eq!(
        RawOutcome::SUCCESS.interpret(convention),
        Ok(Reply::Block(Vaddr::new(1)))
    );
}

#[test]
fn flatten_erases_reasons() {
    let errors = [
        CallError::NullParameter,
        CallError::Malformed(DecodeError::NullData),
        CallError::Unreadable,
        CallError::OutOfMemory,
    ];

    for e in errors {
        assert_eq!(RawOutcome::flatten(Err(e)), RawOutcome::FAILURE);
    }
}

#[test]
fn flatten_replies() {
    assert_eq!(
        RawOutcome::flatten(Ok(Reply::Flag(true))),
        RawOutcome::SUCCESS
    );
    assert_eq!(
        RawOutcome::flatten(Ok(Reply::Block(Vaddr::new(0x1234)))).as_u64(),
        0x1234
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        format!("{}", CallError::Malformed(DecodeError::NegativeLength(-4))),
        "malformed parameter block: negative length field: -4"
    );
    assert_eq!(
        format!("{}", CallError::UnexpectedOutcome(0x10)),
        "unexpected outcome word 0x10"
    );
}
