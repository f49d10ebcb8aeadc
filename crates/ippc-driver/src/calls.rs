// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The two exported procedures, called end to end.
//!
//! `PrintInfo` is staged entirely by the driver: the text, then a parameter
//! block pointing at it. Both allocations are the driver's and are freed
//! once the outcome is in, whatever it was.
//!
//! `GetInformation` runs the other way. The target allocates the result
//! block and its text, and ownership of both passes to the driver with the
//! outcome word. [`RemoteResult`] holds that ownership and frees both
//! exactly once.

use crate::ippc::RemoteAlloc;
use crate::{DriverError, Ippc, RemoteProcess};
use core::fmt;
use ippc_abi::{ParameterBlock, Procedure, RESULT_BLOCK_SIZE, Reply, ResultBlock, Vaddr};

/// What `GetInformation` reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Information {
    /// The returned text.
    pub text: String,
    /// The computed auxiliary value.
    pub auxiliary_value: i32,
}

/// A result block owned by the driver.
///
/// Move-only. The block and its text are freed in the target by
/// [`release`](Self::release), or on drop if it was never called.
#[must_use = "dropping a RemoteResult frees it in the target"]
pub struct RemoteResult<'a, P: RemoteProcess> {
    ippc: &'a Ippc<P>,
    addr: Vaddr,
    block: ResultBlock,
    released: bool,
}

impl<P: RemoteProcess> RemoteResult<'_, P> {
    /// Address of the result block (target address space).
    pub const fn addr(&self) -> Vaddr {
        self.addr
    }

    /// The decoded result block.
    pub const fn block(&self) -> ResultBlock {
        self.block
    }

    /// The auxiliary value carried in the block.
    pub const fn auxiliary_value(&self) -> i32 {
        self.block.auxiliary_value()
    }

    /// Read the returned text out of the target.
    pub fn text(&self) -> Result<String, DriverError> {
        self.ippc.read_string(self.block.data(), self.block.data_length())
    }

    /// Free the block and its text in the target.
    pub fn release(mut self) -> Result<(), DriverError> {
        self.released = true;
        self.free_blocks()
    }

    fn free_blocks(&self) -> Result<(), DriverError> {
        let text = if self.block.data().is_null() {
            Ok(())
        } else {
            self.ippc
                .process
                .free(self.block.data(), self.block.data_length())
        };
        let block = self.ippc.process.free(self.addr, RESULT_BLOCK_SIZE);
        text.and(block)
    }
}

impl<P: RemoteProcess> fmt::Debug for RemoteResult<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteResult")
            .field("addr", &self.addr)
            .field("block", &self.block)
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

impl<P: RemoteProcess> Drop for RemoteResult<'_, P> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.free_blocks() {
            tracing::warn!(addr = %self.addr, error = %e, "failed to free result block");
        }
    }
}

impl<P: RemoteProcess> Ippc<P> {
    /// Have the target print `text`.
    ///
    /// `text` must be ASCII. Both driver allocations are freed before this
    /// returns, on success and on failure.
    pub fn print_info(&self, text: &str) -> Result<(), DriverError> {
        let data = self.write_string(text)?;
        let result = self.print_staged(data, text.len());
        let freed = self.free(data);
        result.and(freed)
    }

    fn print_staged(&self, data: RemoteAlloc, len: usize) -> Result<(), DriverError> {
        let procedure = Procedure::PrintInfo;
        let block = ParameterBlock::new(data.addr(), len).ok_or_else(|| {
            if data.addr().is_null() {
                DriverError::NullAllocation(data.len())
            } else {
                DriverError::TooLong(len)
            }
        })?;
        let param = self.write_parameter_block(block)?;

        let outcome = self.invoke(procedure, param.addr());
        let freed = self.free(param);
        let outcome = outcome?;
        freed?;

        match outcome.interpret(procedure.convention()) {
            Ok(Reply::Flag(true)) => Ok(()),
            _ => Err(DriverError::ProcedureFailed { procedure, outcome }),
        }
    }

    /// Fetch the target's information text and auxiliary value.
    ///
    /// The result block and its text are freed before this returns.
    pub fn get_information(&self) -> Result<Information, DriverError> {
        let procedure = Procedure::GetInformation;
        let outcome = self.invoke(procedure, Vaddr::null())?;
        let Ok(Reply::Block(addr)) = outcome.interpret(procedure.convention()) else {
            return Err(DriverError::ProcedureFailed { procedure, outcome });
        };

        let result = self.take_result(addr)?;
        let info = Information {
            text: result.text()?,
            auxiliary_value: result.auxiliary_value(),
        };
        result.release()?;
        Ok(info)
    }

    /// Take ownership of the result block at `addr`.
    ///
    /// `addr` must be a `GetInformation` outcome nobody else has taken. If
    /// the block cannot be read, it is freed and the error returned.
    pub fn take_result(&self, addr: Vaddr) -> Result<RemoteResult<'_, P>, DriverError> {
        let block = match self.read_result_block(addr) {
            Ok(block) => block,
            Err(e) => {
                if let Err(free) = self.process.free(addr, RESULT_BLOCK_SIZE) {
                    tracing::warn!(%addr, error = %free, "failed to free unreadable result block");
                }
                return Err(e);
            }
        };
        Ok(RemoteResult {
            ippc: self,
            addr,
            block,
            released: false,
        })
    }
}
