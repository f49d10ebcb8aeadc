// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the end-to-end calls.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::{DriverError, Information, Ippc, LoopbackProcess};
use ippc_abi::{INFORMATION_TEXT, Procedure, RAND_MAX, RESULT_BLOCK_SIZE, Reply, Vaddr};
use ippc_target::{AllocStats, CaptureSink, Diagnostic, MockSpace};
use std::time::Duration;

type Driver = Ippc<LoopbackProcess<CaptureSink>>;

fn driver(size: usize) -> Driver {
    let process = LoopbackProcess::new(MockSpace::with_size(size), CaptureSink::new(), 1);
    Ippc::new(process, Duration::from_secs(10))
}

fn stats(driver: &Driver) -> AllocStats {
    driver
        .process()
        .inspect(|t| t.space().stats())
        .unwrap()
}

fn diagnostics(driver: &Driver) -> Vec<Diagnostic> {
    driver
        .process()
        .inspect(|t| t.sink().diagnostics().to_vec())
        .unwrap()
}

// =============================================================================
// print_info
// =============================================================================

#[test]
fn print_info_hi() {
    let driver = driver(4096);

    driver.print_info("hi").unwrap();

    assert_eq!(
        diagnostics(&driver),
        vec![Diagnostic::TextReceived("hi".to_owned())]
    );
    assert_eq!(stats(&driver).live_blocks, 0);
}

#[test]
fn print_info_empty_text() {
    let driver = driver(4096);

    driver.print_info("").unwrap();

    assert_eq!(
        diagnostics(&driver),
        vec![Diagnostic::TextReceived(String::new())]
    );
    assert_eq!(stats(&driver).live_blocks, 0);
}

#[test]
fn print_info_non_ascii_stages_nothing() {
    let driver = driver(4096);

    let err = driver.print_info("grüß").unwrap_err();

    assert!(matches!(err, DriverError::NonAscii { .. }));
    assert_eq!(stats(&driver).total_allocations, 0);
    assert!(diagnostics(&driver).is_empty());
}

#[test]
fn print_info_frees_text_when_block_does_not_fit() {
    // The text fits, the parameter block after it does not
    let driver = driver(16);

    let err = driver.print_info("short").unwrap_err();

    assert!(matches!(err, DriverError::Space(_)));
    let stats = stats(&driver);
    assert_eq!(stats.live_blocks, 0);
    assert_eq!(stats.total_allocations, 1);
    assert!(diagnostics(&driver).is_empty());
}

#[test]
fn print_info_repeated_calls_do_not_leak() {
    let driver = driver(4096);

    for i in 0..50 {
        driver.print_info(&format!("call {i}")).unwrap();
    }

    assert_eq!(stats(&driver).live_blocks, 0);
    assert_eq!(diagnostics(&driver).len(), 50);
}

// =============================================================================
// get_information
// =============================================================================

#[test]
fn get_information_reads_and_releases() {
    let driver = driver(4096);

    let info = driver.get_information().unwrap();

    assert_eq!(
        info,
        Information {
            text: INFORMATION_TEXT.to_owned(),
            auxiliary_value: 41,
        }
    );
    assert!((0..=RAND_MAX).contains(&info.auxiliary_value));
    assert_eq!(diagnostics(&driver), vec![Diagnostic::AuxiliaryValue(41)]);
    assert_eq!(stats(&driver).live_blocks, 0);
}

#[test]
fn get_information_follows_generator_sequence() {
    let driver = driver(4096);

    let values: Vec<i32> = (0..4)
        .map(|_| driver.get_information().unwrap().auxiliary_value)
        .collect();

    assert_eq!(values, vec![41, 18467, 6334, 26500]);
}

#[test]
fn get_information_target_out_of_memory() {
    let driver = driver(8);

    let err = driver.get_information().unwrap_err();

    assert!(matches!(
        err,
        DriverError::ProcedureFailed {
            procedure: Procedure::GetInformation,
            outcome,
        } if outcome.is_failure()
    ));
    assert!(diagnostics(&driver).is_empty());
}

// =============================================================================
// RemoteResult ownership
// =============================================================================

fn start_get_information(driver: &Driver) -> Vaddr {
    let outcome = driver
        .invoke(Procedure::GetInformation, Vaddr::null())
        .unwrap();
    let Ok(Reply::Block(addr)) = outcome.interpret(Procedure::GetInformation.convention()) else {
        panic!("GetInformation failed with {outcome:?}");
    };
    addr
}

#[test]
fn dropping_a_result_releases_it() {
    let driver = driver(4096);
    let addr = start_get_information(&driver);
    assert_eq!(stats(&driver).live_blocks, 2);

    let result = driver.take_result(addr).unwrap();
    assert_eq!(result.text().unwrap(), INFORMATION_TEXT);
    drop(result);

    assert_eq!(stats(&driver).live_blocks, 0);
}

#[test]
fn released_result_is_freed_once() {
    let driver = driver(4096);
    let addr = start_get_information(&driver);

    let result = driver.take_result(addr).unwrap();
    assert_eq!(result.addr(), addr);
    assert_eq!(result.block().data_length(), INFORMATION_TEXT.len());
    result.release().unwrap();

    // A second owner would now find nothing to free
    assert!(driver.take_result(addr).is_err());
    assert_eq!(stats(&driver).live_blocks, 0);
}

#[test]
fn held_results_stay_distinct() {
    let driver = driver(4096);

    let first = driver.take_result(start_get_information(&driver)).unwrap();
    let second = driver.take_result(start_get_information(&driver)).unwrap();

    assert_ne!(first.addr(), second.addr());
    assert_ne!(first.block().data(), second.block().data());
    assert_eq!(stats(&driver).live_blocks, 4);
}

#[test]
fn forgotten_results_leak_monotonically() {
    let driver = driver(64 * 1024);
    let per_call = RESULT_BLOCK_SIZE + INFORMATION_TEXT.len();

    for n in 1..=100 {
        start_get_information(&driver);
        assert_eq!(stats(&driver).live_bytes, n * per_call);
    }
    assert_eq!(stats(&driver).live_blocks, 200);
}
