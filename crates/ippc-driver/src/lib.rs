// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # IPPC driver
//!
//! The caller half of the inter-process procedure calling convention.
//!
//! A driver stages parameters in a target process, starts a thread there on
//! an exported entry point, and turns the thread's exit code back into a
//! result. It never dereferences a target address itself; every access goes
//! through [`RemoteProcess`].
//!
//! - [`config`]: settings from the environment
//! - [`RemoteProcess`]: what the driver needs from the other process
//! - [`LoopbackProcess`]: a target running on threads of this process
//! - [`Ippc`]: marshaling helpers and the two end-to-end calls

pub mod config;
mod calls;
mod error;
mod ippc;
mod loopback;
mod process;

#[cfg(test)]
mod calls_test;

pub use calls::{Information, RemoteResult};
pub use config::DriverConfig;
pub use error::DriverError;
pub use ippc::{Ippc, RemoteAlloc};
pub use loopback::{LoopbackProcess, LoopbackThread};
pub use process::RemoteProcess;
