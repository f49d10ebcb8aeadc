// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A target process.

use crate::diag::DiagnosticSink;
use crate::export::ExportTable;
use crate::procedures;
use crate::rng::SharedRng;
use crate::space::AddressSpace;
use ippc_abi::{CallError, Procedure, RawOutcome, Reply, Vaddr};
use std::sync::Arc;

/// Everything a target process brings to an invocation: its memory, its
/// diagnostic output, its shared generator, and its export table.
pub struct Target<S, D> {
    space: S,
    sink: D,
    rng: Arc<SharedRng>,
    exports: ExportTable,
}

impl<S: AddressSpace, D: DiagnosticSink> Target<S, D> {
    /// Create a target with the default export table.
    pub fn new(space: S, sink: D, rng: Arc<SharedRng>) -> Self {
        Self {
            space,
            sink,
            rng,
            exports: ExportTable::default(),
        }
    }

    /// The target's export table.
    pub const fn exports(&self) -> &ExportTable {
        &self.exports
    }

    /// The target's address space.
    pub const fn space(&self) -> &S {
        &self.space
    }

    /// Mutable access to the target's address space.
    pub const fn space_mut(&mut self) -> &mut S {
        &mut self.space
    }

    /// The target's diagnostic sink.
    pub const fn sink(&self) -> &D {
        &self.sink
    }

    /// Run `procedure` and return its tagged result.
    pub fn call(&mut self, procedure: Procedure, param: Vaddr) -> Result<Reply, CallError> {
        let result = procedures::dispatch(
            procedure,
            &mut self.space,
            &mut self.sink,
            &self.rng,
            param,
        );
        if let Err(e) = &result {
            tracing::debug!(%procedure, %param, error = %e, "procedure failed");
        }
        result
    }

    /// Run the procedure at `entry` and flatten its result to the outcome word.
    ///
    /// This is what a started thread leaves behind as its exit code. An entry
    /// address that is not in the export table yields the failure word.
    pub fn invoke(&mut self, entry: Vaddr, param: Vaddr) -> RawOutcome {
        let Some(procedure) = self.exports.procedure_at(entry) else {
            tracing::warn!(%entry, "invocation of unknown entry point");
            return RawOutcome::FAILURE;
        };
        RawOutcome::flatten(self.call(procedure, param))
    }
}
