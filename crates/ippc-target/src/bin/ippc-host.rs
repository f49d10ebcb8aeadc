// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hosting process for the IPPC exports.
//!
//! Keeps a process with `PrintInfo` and `GetInformation` loaded and idle so a
//! driver can start threads on them.
//!
//! Environment:
//! - `IPPC_LOG` - tracing filter (default `info`)
//! - `IPPC_SEED` - generator seed (default 1)

use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Fixed idle interval of the host loop.
const IDLE_INTERVAL: Duration = Duration::from_millis(500);

#[expect(
    clippy::infinite_loop,
    reason = "the host idles until it is killed"
)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("IPPC_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(raw) = std::env::var("IPPC_SEED") {
        match raw.parse::<u32>() {
            Ok(seed) => ippc_target::ffi::seed_generator(seed),
            Err(e) => {
                tracing::error!(value = %raw, error = %e, "invalid IPPC_SEED");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("IPPC - Interprocess Procedure Calling");
    println!("Exports:");
    for (name, _) in ippc_target::ExportTable::default().iter() {
        println!("  {name}");
    }
    tracing::info!(pid = std::process::id(), "host ready");

    loop {
        std::thread::sleep(IDLE_INTERVAL);
    }
}
