//! Keyed entry storage for indicator caches.

pub mod keyed;
pub mod overflow;

pub use keyed::KeyedBuffer;
pub use overflow::{
    candle_overflow_listener, OverflowListener, OverflowReason, DEFAULT_MAX_CONFLICTS,
    MAX_CACHE_SLOTS,
};

use serde::{Deserialize, Serialize};

/// Behaviour flags of a keyed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferFlags(u8);

impl BufferFlags {
    pub const NONE: BufferFlags = BufferFlags(0);
    /// Removals re-seat the following probe cluster instead of leaving a
    /// tombstone; slot order is not preserved.
    pub const FILL_HOLES_UNSORTED: BufferFlags = BufferFlags(1);

    pub const fn contains(self, other: BufferFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: BufferFlags) {
        self.0 |= other.0;
    }
}

/// Keyed store an indicator cache keeps its entries in.
///
/// Keys are entry timestamps.
pub trait BufferStore<V>: Send + Sync {
    /// Copy of the value stored under `key`.
    fn get_by_key(&self, key: i64) -> Option<V>;

    fn add(&mut self, value: V, key: i64);

    fn set_overflow_listener(&mut self, listener: OverflowListener, max_conflicts: usize);

    fn add_flags(&mut self, flags: BufferFlags);

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
