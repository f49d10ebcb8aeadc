// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Diagnostic output of the exported procedures.
//!
//! Procedures report what they did through a [`DiagnosticSink`]. The sink
//! decides where that goes:
//! - `TracingSink` - `tracing` events, for real target processes
//! - `CaptureSink` - an in-memory list, for tests

mod capture;

pub use capture::CaptureSink;

use core::fmt;

/// One piece of diagnostic output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// `PrintInfo` received this text.
    TextReceived(String),
    /// `GetInformation` computed this auxiliary value.
    AuxiliaryValue(i32),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextReceived(text) => write!(f, "String received: {text}"),
            Self::AuxiliaryValue(value) => write!(f, "Our random number is {value}!"),
        }
    }
}

/// Destination for diagnostic output.
pub trait DiagnosticSink {
    /// Emit one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Sink that turns diagnostics into `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::TextReceived(text) => {
                tracing::info!(target: "ippc::diag", len = text.len(), "{diagnostic}");
            }
            Diagnostic::AuxiliaryValue(value) => {
                tracing::info!(target: "ippc::diag", value, "{diagnostic}");
            }
        }
    }
}
