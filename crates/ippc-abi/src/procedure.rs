// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Exported procedure table.
//!
//! A target advertises exactly two entry points. Each takes one address and
//! leaves one word behind; what that word means depends on which procedure
//! ran, so the mapping lives here as a closed enum.
//!
//! | Procedure | Argument | Outcome |
//! |-----------|----------|---------|
//! | `PrintInfo` | address of a `ParameterBlock` | `0` failure, `1` success |
//! | `GetInformation` | ignored | `0` failure, else address of a `ResultBlock` |

use core::fmt;

/// Text returned by `GetInformation`.
pub const INFORMATION_TEXT: &str = "Hello from the other side! (the dynamic link library...)";

/// Upper bound (inclusive) of the auxiliary value produced by `GetInformation`.
pub const RAND_MAX: i32 = 0x7FFF;

/// How a procedure's outcome word must be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultConvention {
    /// `0` is failure, `1` is success.
    Boolean,
    /// `0` is failure, anything else is the address of a `ResultBlock`.
    BlockPointer,
}

/// An exported entry point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    /// Print a caller-supplied byte run as text.
    PrintInfo,
    /// Hand back a freshly allocated `ResultBlock`.
    GetInformation,
}

impl Procedure {
    /// Every exported procedure, in export order.
    pub const ALL: [Self; 2] = [Self::PrintInfo, Self::GetInformation];

    /// Exported symbol name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PrintInfo => "PrintInfo",
            Self::GetInformation => "GetInformation",
        }
    }

    /// Look up a procedure by its exported symbol name.
    ///
    /// Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// How this procedure's outcome word is interpreted.
    #[must_use]
    pub const fn convention(self) -> ResultConvention {
        match self {
            Self::PrintInfo => ResultConvention::Boolean,
            Self::GetInformation => ResultConvention::BlockPointer,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn names_round_trip() {
        for procedure in Procedure::ALL {
            assert_eq!(Procedure::from_name(procedure.name()), Some(procedure));
        }
    }

    #[test]
    fn unknown_names() {
        assert!(Procedure::from_name("printinfo").is_none());
        assert!(Procedure::from_name("").is_none());
        assert!(Procedure::from_name("LoadLibraryA").is_none());
    }

    #[test]
    fn conventions() {
        assert_eq!(Procedure::PrintInfo.convention(), ResultConvention::Boolean);
        assert_eq!(
            Procedure::GetInformation.convention(),
            ResultConvention::BlockPointer
        );
    }

    #[test]
    fn information_text_fits_length_field() {
        assert!(INFORMATION_TEXT.len() <= crate::block::MAX_LENGTH);
        assert!(INFORMATION_TEXT.is_ascii());
    }
}
