// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Export table of a target image.
//!
//! A driver locates an entry point by name before starting it. In a real
//! process this means walking the loaded module's export directory; here the
//! table is explicit. Entry addresses are opaque: they identify a procedure
//! and are never dereferenced.

use ippc_abi::{Procedure, Vaddr};

/// Default load address of a target image.
pub const DEFAULT_IMAGE_BASE: Vaddr = Vaddr::new(0x1000_0000);

/// Offset of the first entry point from the image base.
const FIRST_ENTRY: u64 = 0x1000;

/// Distance between consecutive entry points.
const ENTRY_STRIDE: u64 = 0x10;

/// Name → entry address mapping for one loaded target image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportTable {
    image_base: Vaddr,
}

impl ExportTable {
    /// Build the export table of an image loaded at `image_base`.
    #[must_use]
    pub const fn new(image_base: Vaddr) -> Self {
        Self { image_base }
    }

    /// Load address of the image.
    #[must_use]
    pub const fn image_base(&self) -> Vaddr {
        self.image_base
    }

    /// Entry address of `procedure`.
    #[must_use]
    pub const fn entry(&self, procedure: Procedure) -> Vaddr {
        let index = match procedure {
            Procedure::PrintInfo => 0,
            Procedure::GetInformation => 1,
        };
        self.image_base.add(FIRST_ENTRY + index * ENTRY_STRIDE)
    }

    /// Resolve an exported symbol name to its entry address.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Vaddr> {
        Procedure::from_name(name).map(|p| self.entry(p))
    }

    /// Find the procedure whose entry point is `entry`.
    #[must_use]
    pub fn procedure_at(&self, entry: Vaddr) -> Option<Procedure> {
        Procedure::ALL.into_iter().find(|&p| self.entry(p) == entry)
    }

    /// Iterate over `(name, entry)` pairs in export order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Vaddr)> + use<> {
        let table = *self;
        Procedure::ALL
            .into_iter()
            .map(move |p| (p.name(), table.entry(p)))
    }
}

impl Default for ExportTable {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}
