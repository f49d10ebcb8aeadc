// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core type definitions shared by both sides of a call.

mod addr;


pub use addr::Vaddr;
