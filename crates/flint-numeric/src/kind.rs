// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Integer kinds and their ranges.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// The fourteen integer kinds of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntegerKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    /// Arbitrary precision, signed.
    Int,
    /// Arbitrary precision, never negative.
    UInt,
}

impl IntegerKind {
    pub const ALL: [IntegerKind; 14] = [
        IntegerKind::Int8,
        IntegerKind::Int16,
        IntegerKind::Int32,
        IntegerKind::Int64,
        IntegerKind::Int128,
        IntegerKind::Int256,
        IntegerKind::UInt8,
        IntegerKind::UInt16,
        IntegerKind::UInt32,
        IntegerKind::UInt64,
        IntegerKind::UInt128,
        IntegerKind::UInt256,
        IntegerKind::Int,
        IntegerKind::UInt,
    ];

    /// The fixed-width kinds, signed first.
    pub const FIXED: [IntegerKind; 12] = [
        IntegerKind::Int8,
        IntegerKind::Int16,
        IntegerKind::Int32,
        IntegerKind::Int64,
        IntegerKind::Int128,
        IntegerKind::Int256,
        IntegerKind::UInt8,
        IntegerKind::UInt16,
        IntegerKind::UInt32,
        IntegerKind::UInt64,
        IntegerKind::UInt128,
        IntegerKind::UInt256,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntegerKind::Int8 => "Int8",
            IntegerKind::Int16 => "Int16",
            IntegerKind::Int32 => "Int32",
            IntegerKind::Int64 => "Int64",
            IntegerKind::Int128 => "Int128",
            IntegerKind::Int256 => "Int256",
            IntegerKind::UInt8 => "UInt8",
            IntegerKind::UInt16 => "UInt16",
            IntegerKind::UInt32 => "UInt32",
            IntegerKind::UInt64 => "UInt64",
            IntegerKind::UInt128 => "UInt128",
            IntegerKind::UInt256 => "UInt256",
            IntegerKind::Int => "Int",
            IntegerKind::UInt => "UInt",
        }
    }

    /// Look up a kind by its type name, e.g. `"UInt64"`.
    pub fn from_name(name: &str) -> Option<IntegerKind> {
        IntegerKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            IntegerKind::Int8
                | IntegerKind::Int16
                | IntegerKind::Int32
                | IntegerKind::Int64
                | IntegerKind::Int128
                | IntegerKind::Int256
                | IntegerKind::Int
        )
    }

    /// Bit width of fixed-width kinds; `None` for `Int` and `UInt`.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            IntegerKind::Int8 | IntegerKind::UInt8 => Some(8),
            IntegerKind::Int16 | IntegerKind::UInt16 => Some(16),
            IntegerKind::Int32 | IntegerKind::UInt32 => Some(32),
            IntegerKind::Int64 | IntegerKind::UInt64 => Some(64),
            IntegerKind::Int128 | IntegerKind::UInt128 => Some(128),
            IntegerKind::Int256 | IntegerKind::UInt256 => Some(256),
            IntegerKind::Int | IntegerKind::UInt => None,
        }
    }

    /// Smallest representable value; `None` when unbounded below.
    pub fn min(self) -> Option<BigInt> {
        match (self.bit_width(), self.is_signed()) {
            (Some(bits), true) => Some(-(BigInt::one() << (bits - 1))),
            (_, false) => Some(BigInt::zero()),
            (None, true) => None,
        }
    }

    /// Largest representable value; `None` when unbounded above.
    pub fn max(self) -> Option<BigInt> {
        let bits = self.bit_width()?;
        if self.is_signed() {
            Some((BigInt::one() << (bits - 1)) - 1)
        } else {
            Some((BigInt::one() << bits) - 1)
        }
    }

    /// Whether `n` lies within the kind's range.
    pub fn contains(self, n: &BigInt) -> bool {
        self.min().map_or(true, |min| *n >= min) && self.max().map_or(true, |max| *n <= max)
    }
}

impl fmt::Display for IntegerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
