//! Open-addressing keyed buffer with a pluggable overflow policy.
//!
//! Keys are timestamps. A key is mixed before it is mapped onto a slot, so
//! regularly spaced bars (daily, hourly, minute) spread over the table
//! instead of sharing home slots. Collisions probe linearly. Once half the
//! slots are used the overflow listener is asked whether the table may grow;
//! when it is full, or probing runs past the conflict limit, a refusal
//! overwrites the key's home slot.

use super::overflow::{OverflowListener, OverflowReason};
use super::{BufferFlags, BufferStore};
use tracing::debug;

/// Growth step as a percentage of the current capacity.
const GROW_PERCENT: usize = 25;

/// Load, in percent, at which growth is requested before the table fills.
const GROW_LOAD_PERCENT: usize = 50;

#[derive(Debug, Clone)]
enum Slot<V> {
    Empty,
    Removed,
    Used { key: i64, value: V },
}

#[derive(Debug, Clone)]
pub struct KeyedBuffer<V> {
    slots: Vec<Slot<V>>,
    used: usize,
    flags: BufferFlags,
    overflow_listener: Option<OverflowListener>,
    max_conflicts: usize,
}

impl<V> Default for KeyedBuffer<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V> KeyedBuffer<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots,
            used: 0,
            flags: BufferFlags::NONE,
            overflow_listener: None,
            max_conflicts: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn flags(&self) -> BufferFlags {
        self.flags
    }

    pub fn add_flags(&mut self, flags: BufferFlags) {
        self.flags.insert(flags);
    }

    /// Installs `listener`, consulted once probing exceeds `max_conflicts`
    /// occupied slots or the table is full.
    pub fn set_overflow_listener(&mut self, listener: OverflowListener, max_conflicts: usize) {
        self.overflow_listener = Some(listener);
        self.max_conflicts = max_conflicts;
    }

    pub fn get(&self, key: i64) -> Option<&V> {
        self.find(key).and_then(|idx| match &self.slots[idx] {
            Slot::Used { value, .. } => Some(value),
            _ => None,
        })
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Stores `value` under `key`, overwriting any previous value for it.
    pub fn insert(&mut self, key: i64, value: V) {
        if let Some(idx) = self.find(key) {
            self.slots[idx] = Slot::Used { key, value };
            return;
        }

        'retry: loop {
            if self.used == self.slots.len() {
                if !self.slots.is_empty() && !self.may_grow(OverflowReason::Full, 0) {
                    self.overwrite_home(key, value);
                    return;
                }
                self.grow();
                continue 'retry;
            }

            // A refusal here only means the table keeps filling up.
            if self.used * 100 >= self.slots.len() * GROW_LOAD_PERCENT
                && self.may_grow(OverflowReason::Full, 0)
            {
                self.grow();
                continue 'retry;
            }

            let capacity = self.slots.len();
            let mut pos = self.home(key);
            let mut conflicts = 0;
            while let Slot::Used { .. } = self.slots[pos] {
                conflicts += 1;
                if self.overflow_listener.is_some() && conflicts > self.max_conflicts {
                    if !self.may_grow(OverflowReason::TooManyConflicts, conflicts) {
                        self.overwrite_home(key, value);
                        return;
                    }
                    self.grow();
                    continue 'retry;
                }
                pos = (pos + 1) % capacity;
            }

            self.slots[pos] = Slot::Used { key, value };
            self.used += 1;
            return;
        }
    }

    /// Removes `key`, returning its value.
    ///
    /// With `FILL_HOLES_UNSORTED` the rest of the probe cluster is re-seated
    /// so no tombstone is left behind.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let idx = self.find(key)?;
        let hole = if self.flags.contains(BufferFlags::FILL_HOLES_UNSORTED) {
            Slot::Empty
        } else {
            Slot::Removed
        };
        let removed = std::mem::replace(&mut self.slots[idx], hole);
        self.used -= 1;

        if self.flags.contains(BufferFlags::FILL_HOLES_UNSORTED) {
            self.reseat_cluster_after(idx);
        }

        match removed {
            Slot::Used { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.used = 0;
    }

    /// Stored `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Used { key, value } => Some((*key, value)),
            _ => None,
        })
    }

    /// Home slot of `key`: the high bits of the mixed key scaled onto the
    /// table. Requires a non-empty table.
    pub(crate) fn home(&self, key: i64) -> usize {
        ((mix(key as u64) as u128 * self.slots.len() as u128) >> 64) as usize
    }

    fn find(&self, key: i64) -> Option<usize> {
        let capacity = self.slots.len();
        if capacity == 0 {
            return None;
        }
        let mut pos = self.home(key);
        for _ in 0..capacity {
            match &self.slots[pos] {
                Slot::Empty => return None,
                Slot::Used { key: k, .. } if *k == key => return Some(pos),
                _ => {}
            }
            pos = (pos + 1) % capacity;
        }
        None
    }

    fn may_grow(&self, reason: OverflowReason, conflicts: usize) -> bool {
        match self.overflow_listener {
            Some(listener) => listener(reason, self.used, conflicts),
            None => true,
        }
    }

    /// Replaces whatever sits in `key`'s home slot.
    fn overwrite_home(&mut self, key: i64, value: V) {
        let home = self.home(key);
        if let Slot::Used { key: evicted, .. } = self.slots[home] {
            debug!(key, evicted, slot = home, "keyed buffer slot reused");
        } else {
            self.used += 1;
        }
        self.slots[home] = Slot::Used { key, value };
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity + (old_capacity * GROW_PERCENT / 100).max(1);
        let mut fresh = Vec::with_capacity(new_capacity);
        fresh.resize_with(new_capacity, || Slot::Empty);
        let old = std::mem::replace(&mut self.slots, fresh);
        self.used = 0;
        for slot in old {
            if let Slot::Used { key, value } = slot {
                self.place(key, value);
            }
        }
        debug!(old_capacity, new_capacity, len = self.used, "keyed buffer resized");
    }

    /// Linear-probe placement with no overflow policy. Requires a free slot.
    fn place(&mut self, key: i64, value: V) {
        let capacity = self.slots.len();
        let mut pos = self.home(key);
        while let Slot::Used { .. } = self.slots[pos] {
            pos = (pos + 1) % capacity;
        }
        self.slots[pos] = Slot::Used { key, value };
        self.used += 1;
    }

    fn reseat_cluster_after(&mut self, hole: usize) {
        let capacity = self.slots.len();
        let mut pos = (hole + 1) % capacity;
        while pos != hole {
            match std::mem::replace(&mut self.slots[pos], Slot::Empty) {
                Slot::Empty => break,
                Slot::Removed => {}
                Slot::Used { key, value } => {
                    self.used -= 1;
                    self.place(key, value);
                }
            }
            pos = (pos + 1) % capacity;
        }
    }
}

/// SplitMix64 finalizer.
fn mix(key: u64) -> u64 {
    let mut z = key.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl<V: Clone + Send + Sync> BufferStore<V> for KeyedBuffer<V> {
    fn get_by_key(&self, key: i64) -> Option<V> {
        self.get(key).cloned()
    }

    fn add(&mut self, value: V, key: i64) {
        self.insert(key, value);
    }

    fn set_overflow_listener(&mut self, listener: OverflowListener, max_conflicts: usize) {
        KeyedBuffer::set_overflow_listener(self, listener, max_conflicts);
    }

    fn add_flags(&mut self, flags: BufferFlags) {
        KeyedBuffer::add_flags(self, flags);
    }

    fn len(&self) -> usize {
        self.used
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}
