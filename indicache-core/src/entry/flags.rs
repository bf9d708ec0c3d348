//! Entry status flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set of entry status flags.
///
/// Bit values match the framework's persisted layout, so flags round-trip
/// through any stored entries unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryFlags(u8);

impl EntryFlags {
    pub const NONE: EntryFlags = EntryFlags(0);
    pub const BITWISE: EntryFlags = EntryFlags(1);
    /// 64-bit wide value (long, ulong, double).
    pub const DOUBLED: EntryFlags = EntryFlags(1 << 1);
    pub const EXPIRED: EntryFlags = EntryFlags(1 << 2);
    /// Floating point value.
    pub const REAL: EntryFlags = EntryFlags(1 << 3);
    pub const UNSIGNED: EntryFlags = EntryFlags(1 << 4);
    pub const VALID: EntryFlags = EntryFlags(1 << 5);
    /// Terminal negative result: not enough history to compute the entry.
    pub const INSUFFICIENT_DATA: EntryFlags = EntryFlags(1 << 6);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: EntryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: EntryFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: EntryFlags) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: EntryFlags, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for EntryFlags {
    type Output = EntryFlags;

    fn bitor(self, rhs: EntryFlags) -> EntryFlags {
        EntryFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for EntryFlags {
    fn bitor_assign(&mut self, rhs: EntryFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for EntryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(EntryFlags, &str); 7] = [
            (EntryFlags::BITWISE, "bitwise"),
            (EntryFlags::DOUBLED, "doubled"),
            (EntryFlags::EXPIRED, "expired"),
            (EntryFlags::REAL, "real"),
            (EntryFlags::UNSIGNED, "unsigned"),
            (EntryFlags::VALID, "valid"),
            (EntryFlags::INSUFFICIENT_DATA, "insufficient_data"),
        ];
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}
