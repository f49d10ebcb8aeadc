// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Interactive driver.
//!
//! Reads commands from stdin and runs them against a loopback target:
//!
//! - `send` - prompt for a line and have the target print it
//! - `get` - fetch the target's information text and number
//! - `exit` - quit
//!
//! Environment: `IPPC_LOG` (tracing filter), plus the variables read by
//! [`DriverConfig::from_env`].

use ippc_driver::{DriverConfig, DriverError, Ippc, LoopbackProcess};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type Driver = Ippc<LoopbackProcess>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("IPPC_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match DriverConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "bad configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "starting loopback target");
    let driver = Ippc::new(LoopbackProcess::from_config(&config), config.wait_timeout);

    match repl(&driver, &mut io::stdin().lock()) {
        Ok(()) => {
            println!("Exited! Thanks for using.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}

fn repl(driver: &Driver, input: &mut impl BufRead) -> io::Result<()> {
    println!("IPPC - Interprocess procedure calling");
    loop {
        println!();
        println!("Usage:");
        println!(" - send");
        println!(" - get");
        println!(" - exit");
        let Some(command) = prompt(input, "> ")? else {
            return Ok(());
        };

        let result = match command.trim() {
            "exit" => return Ok(()),
            "send" => {
                let Some(text) = prompt(input, "String to send: ")? else {
                    return Ok(());
                };
                driver.print_info(&text)
            }
            "get" => get(driver),
            "" => continue,
            other => {
                println!("Unknown command {other:?}");
                continue;
            }
        };

        match result {
            Ok(()) => println!("Operation done!"),
            Err(e) => {
                tracing::warn!(error = %e, "remote call failed");
                println!("Failed to call remote procedure: {e}");
            }
        }
    }
}

fn get(driver: &Driver) -> Result<(), DriverError> {
    let info = driver.get_information()?;
    println!("Target says: {}", info.text);
    println!("Target gave us a number: {}", info.auxiliary_value);
    Ok(())
}

/// Print `label` and read one line, or `None` at end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}
