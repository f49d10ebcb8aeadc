// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! A target living in the driver's own process.
//!
//! The target keeps its own simulated address space, so every address the
//! driver handles is still foreign: it can only be used through
//! [`RemoteProcess`]. Each [`start`](RemoteProcess::start) spawns a real OS
//! thread whose return value is the outcome word.

use crate::config::DriverConfig;
use crate::{DriverError, RemoteProcess};
use ippc_abi::{RawOutcome, Vaddr};
use ippc_target::{
    AddressSpace, DiagnosticSink, ExportTable, MockSpace, SharedRng, Target, TracingSink,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A started invocation on a [`LoopbackProcess`].
#[derive(Debug)]
pub struct LoopbackThread {
    id: u64,
    done: mpsc::Receiver<()>,
    handle: JoinHandle<RawOutcome>,
}

impl LoopbackThread {
    /// Sequence number of this invocation within its process.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// An in-process target reachable only through [`RemoteProcess`].
pub struct LoopbackProcess<D = TracingSink> {
    target: Arc<Mutex<Target<MockSpace, D>>>,
    exports: ExportTable,
    next_thread: AtomicU64,
}

impl LoopbackProcess<TracingSink> {
    /// Create a loopback target sized and seeded from `config`.
    #[must_use]
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(
            MockSpace::with_size(config.target_size),
            TracingSink,
            config.seed,
        )
    }
}

impl<D: DiagnosticSink + Send + 'static> LoopbackProcess<D> {
    /// Create a loopback target over `space`, reporting to `sink`.
    #[must_use]
    pub fn new(space: MockSpace, sink: D, seed: u32) -> Self {
        let target = Target::new(space, sink, Arc::new(SharedRng::new(seed)));
        let exports = *target.exports();
        Self {
            target: Arc::new(Mutex::new(target)),
            exports,
            next_thread: AtomicU64::new(1),
        }
    }

    /// Run `f` against the target's current state.
    ///
    /// Holds the target for the duration of `f`; invocations started in the
    /// meantime wait for it.
    pub fn inspect<R>(&self, f: impl FnOnce(&Target<MockSpace, D>) -> R) -> Result<R, DriverError> {
        let target = self.lock()?;
        Ok(f(&target))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Target<MockSpace, D>>, DriverError> {
        self.target.lock().map_err(|_| DriverError::Poisoned)
    }
}

impl<D: DiagnosticSink + Send + 'static> RemoteProcess for LoopbackProcess<D> {
    type Thread = LoopbackThread;

    fn allocate(&self, len: usize) -> Result<Vaddr, DriverError> {
        Ok(self.lock()?.space_mut().allocate(len)?)
    }

    fn write(&self, addr: Vaddr, bytes: &[u8]) -> Result<(), DriverError> {
        Ok(self.lock()?.space_mut().write(addr, bytes)?)
    }

    fn read(&self, addr: Vaddr, len: usize) -> Result<Vec<u8>, DriverError> {
        let target = self.lock()?;
        Ok(target.space().read(addr, len)?.to_vec())
    }

    fn free(&self, addr: Vaddr, len: usize) -> Result<(), DriverError> {
        Ok(self.lock()?.space_mut().release(addr, len)?)
    }

    fn resolve(&self, name: &str) -> Option<Vaddr> {
        self.exports.resolve(name)
    }

    fn start(&self, entry: Vaddr, argument: Vaddr) -> Result<LoopbackThread, DriverError> {
        let id = self.next_thread.fetch_add(1, Ordering::Relaxed);
        let target = Arc::clone(&self.target);
        let (finished, done) = mpsc::channel();

        let handle = thread::Builder::new()
            .name(format!("ippc-invoke-{id}"))
            .spawn(move || {
                let outcome = match target.lock() {
                    Ok(mut target) => target.invoke(entry, argument),
                    Err(_) => {
                        tracing::warn!(thread = id, "target poisoned, invocation skipped");
                        RawOutcome::FAILURE
                    }
                };
                if finished.send(()).is_err() {
                    tracing::trace!(thread = id, "driver stopped waiting");
                }
                outcome
            })?;

        tracing::debug!(thread = id, %entry, %argument, "invocation started");
        Ok(LoopbackThread { id, done, handle })
    }

    fn join(&self, thread: LoopbackThread, timeout: Duration) -> Result<RawOutcome, DriverError> {
        match thread.done.recv_timeout(timeout) {
            // Disconnected without a signal: the thread unwound
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(thread = thread.id, ?timeout, "invocation still running, detaching");
                return Err(DriverError::Timeout(timeout));
            }
        }
        let outcome = thread.handle.join().map_err(|_| DriverError::ThreadLost)?;
        tracing::debug!(thread = thread.id, ?outcome, "invocation finished");
        Ok(outcome)
    }
}
