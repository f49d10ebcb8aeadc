// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Process-wide pseudo-random generator.
//!
//! `GetInformation` draws its auxiliary value from here. The generator is a
//! linear congruential generator with the C runtime's constants, so a target
//! seeded with 1 produces the familiar `41, 18467, 6334, ...` sequence.
//!
//! Concurrent invocations share one generator. Every draw goes through a
//! mutex, so interleaved calls each observe a distinct step of the sequence.

use ippc_abi::RAND_MAX;
use std::sync::{Mutex, PoisonError};

const MULTIPLIER: u32 = 214_013;
const INCREMENT: u32 = 2_531_011;

/// Mutex-guarded generator shared by all invocations in a process.
#[derive(Debug)]
pub struct SharedRng {
    state: Mutex<u32>,
}

impl SharedRng {
    /// Seed used when nobody seeds explicitly.
    pub const DEFAULT_SEED: u32 = 1;

    /// Create a generator with the given seed.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: Mutex::new(seed),
        }
    }

    /// Draw the next value in `0..=RAND_MAX`.
    pub fn next_value(&self) -> i32 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        // Masked to 15 bits, always fits
        ((*state >> 16) & RAND_MAX.unsigned_abs()) as i32
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&self, seed: u32) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = seed;
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}
