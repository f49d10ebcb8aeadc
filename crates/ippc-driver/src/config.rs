// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Driver configuration.
//!
//! Defaults, overridden by environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `IPPC_WAIT_TIMEOUT_MS` | 60000 | How long to wait for an outcome |
//! | `IPPC_TARGET_SIZE` | 1 MiB | Loopback target address space size |
//! | `IPPC_SEED` | 1 | Loopback target generator seed |

use crate::DriverError;
use core::str::FromStr;
use std::time::Duration;

/// Environment variable for [`DriverConfig::wait_timeout`], in milliseconds.
pub const WAIT_TIMEOUT_VAR: &str = "IPPC_WAIT_TIMEOUT_MS";

/// Environment variable for [`DriverConfig::target_size`], in bytes.
pub const TARGET_SIZE_VAR: &str = "IPPC_TARGET_SIZE";

/// Environment variable for [`DriverConfig::seed`].
pub const SEED_VAR: &str = "IPPC_SEED";

/// Settings for a driver and its loopback target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Longest wait for an invocation's outcome.
    pub wait_timeout: Duration,
    /// Size of the loopback target's address space.
    pub target_size: usize,
    /// Seed of the loopback target's generator.
    pub seed: u32,
}

impl DriverConfig {
    /// Default outcome wait.
    pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default loopback address space size.
    pub const DEFAULT_TARGET_SIZE: usize = 1024 * 1024;

    /// Default generator seed.
    pub const DEFAULT_SEED: u32 = 1;

    /// Build a configuration from the process environment.
    pub fn from_env() -> Result<Self, DriverError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from defaults and whatever `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DriverError> {
        let mut config = Self::default();
        if let Some(ms) = parse::<u64>(&lookup, WAIT_TIMEOUT_VAR)? {
            config.wait_timeout = Duration::from_millis(ms);
        }
        if let Some(size) = parse(&lookup, TARGET_SIZE_VAR)? {
            config.target_size = size;
        }
        if let Some(seed) = parse(&lookup, SEED_VAR)? {
            config.seed = seed;
        }
        Ok(config)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            wait_timeout: Self::DEFAULT_WAIT_TIMEOUT,
            target_size: Self::DEFAULT_TARGET_SIZE,
            seed: Self::DEFAULT_SEED,
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, DriverError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(DriverError::Config { name, value }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = DriverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.wait_timeout, Duration::from_millis(60_000));
        assert_eq!(config.target_size, 1 << 20);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn overrides_apply() {
        let config = DriverConfig::from_lookup(lookup(&[
            (WAIT_TIMEOUT_VAR, "250"),
            (TARGET_SIZE_VAR, " 4096 "),
            (SEED_VAR, "7"),
        ]))
        .unwrap();

        assert_eq!(config.wait_timeout, Duration::from_millis(250));
        assert_eq!(config.target_size, 4096);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let err = DriverConfig::from_lookup(lookup(&[(SEED_VAR, "-3")])).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Config { name: SEED_VAR, ref value } if value == "-3"
        ));
    }
}
