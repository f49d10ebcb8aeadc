// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The exported procedures.
//!
//! Each procedure takes the argument address it was started with and returns
//! a tagged `Result<Reply, CallError>`. Flattening to the outcome word
//! happens in the caller ([`Target::invoke`](crate::Target::invoke) or the
//! `extern "C"` shims), never in here.

mod get_information;
mod print_info;


pub use get_information::get_information;
pub use print_info::print_info;

use crate::diag::DiagnosticSink;
use crate::rng::SharedRng;
use crate::space::AddressSpace;
use ippc_abi::{CallError, Procedure, Reply, Vaddr};

/// Run `procedure` with argument `param`.
pub fn dispatch<S, D>(
    procedure: Procedure,
    space: &mut S,
    sink: &mut D,
    rng: &SharedRng,
    param: Vaddr,
) -> Result<Reply, CallError>
where
    S: AddressSpace + ?Sized,
    D: DiagnosticSink + ?Sized,
{
    match procedure {
        Procedure::PrintInfo => print_info(&*space, sink, param),
        Procedure::GetInformation => get_information(space, sink, rng, param),
    }
}
