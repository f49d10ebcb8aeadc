// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Capturing sink for tests.
//!
//! Records every diagnostic in order so tests can assert on exactly what a
//! procedure emitted, or that it emitted nothing.

use super::{Diagnostic, DiagnosticSink};

/// Diagnostic sink backed by a `Vec`.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    diagnostics: Vec<Diagnostic>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics emitted so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Texts received by `PrintInfo`, in order.
    pub fn received_texts(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::TextReceived(text) => Some(text.as_str()),
            Diagnostic::AuxiliaryValue(_) => None,
        })
    }

    /// Remove and return everything captured so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        core::mem::take(&mut self.diagnostics)
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CaptureSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
