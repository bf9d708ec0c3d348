//! Indicator data entries: one record of per-mode values per timestamp.

pub mod flags;
pub mod value;

pub use flags::EntryFlags;
pub use value::{EntryScalar, EntryValue, ValueKind};

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Indicator values computed for a single timestamp.
///
/// Created lazily on the first request for a timestamp. Once flagged
/// `VALID` and stored in a cache it is never modified again.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorDataEntry {
    pub timestamp: i64,
    pub values: Vec<EntryValue>,
    pub flags: EntryFlags,
}

impl IndicatorDataEntry {
    /// Empty entry for `timestamp` with `modes` default-valued slots.
    pub fn new(timestamp: i64, modes: usize) -> Self {
        Self {
            timestamp,
            values: vec![EntryValue::default(); modes],
            flags: EntryFlags::NONE,
        }
    }

    /// Number of values (modes) in the entry.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn resize(&mut self, modes: usize) {
        self.values.resize(modes, EntryValue::default());
    }

    pub fn get(&self, mode: usize) -> Option<EntryValue> {
        self.values.get(mode).copied()
    }

    pub fn is_valid(&self) -> bool {
        self.flags.contains(EntryFlags::VALID)
    }

    pub fn has_insufficient_data(&self) -> bool {
        self.flags.contains(EntryFlags::INSUFFICIENT_DATA)
    }

    pub fn check_flags(&self, flags: EntryFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn add_flags(&mut self, flags: EntryFlags) {
        self.flags.insert(flags);
    }

    pub fn set_flag(&mut self, flag: EntryFlags, value: bool) {
        self.flags.set(flag, value);
    }

    /// True if any value, projected onto `T`, equals `needle`.
    pub fn has_value<T: EntryScalar>(&self, needle: T) -> bool {
        self.values.iter().any(|v| T::project(v) == needle)
    }
}

impl Index<usize> for IndicatorDataEntry {
    type Output = EntryValue;

    fn index(&self, mode: usize) -> &EntryValue {
        &self.values[mode]
    }
}
