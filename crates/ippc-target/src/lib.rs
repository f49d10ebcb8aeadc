// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # IPPC target
//!
//! The callee half of the inter-process procedure calling convention.
//!
//! ## Architecture
//!
//! A target process exports two procedures. A driver running in another
//! process writes a parameter block into the target's memory, starts a thread
//! on one of the exported entry points, and reads the thread's exit code back
//! as the outcome word.
//!
//! - [`space`]: bounds-checked access to the target's own memory
//! - [`diag`]: where the procedures' diagnostic output goes
//! - [`rng`]: the process-wide pseudo-random generator
//! - [`procedures`]: `PrintInfo` and `GetInformation`
//! - [`Target`]: a target process bundling the above with its export table
//! - [`ffi`]: the literal `extern "C"` entry points

pub mod diag;
pub mod export;
pub mod ffi;
pub mod procedures;
pub mod rng;
pub mod space;
mod target;

pub use diag::{CaptureSink, Diagnostic, DiagnosticSink, TracingSink};
pub use export::ExportTable;
pub use rng::SharedRng;
pub use space::{AddressSpace, AllocStats, LocalSpace, MockSpace, SpaceError};
pub use target::Target;
