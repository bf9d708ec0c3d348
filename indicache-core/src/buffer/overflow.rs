//! Overflow policy for keyed buffers.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Slots a candle cache may grow to: one day at one-second resolution.
pub const MAX_CACHE_SLOTS: usize = 86_400;

/// Conflicts tolerated while probing before the listener is consulted.
pub const DEFAULT_MAX_CONFLICTS: usize = 10;

/// Why a buffer is asking whether it may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverflowReason {
    /// The table is past its load limit or every slot is in use.
    Full,
    /// Probing for a free slot passed the conflict limit.
    TooManyConflicts,
}

/// Called with `(reason, stored entries, conflicts so far)`.
///
/// Returns true to let the buffer grow, false to overwrite a slot instead.
pub type OverflowListener = fn(OverflowReason, usize, usize) -> bool;

/// Candle cache policy.
///
/// Grows while under [`MAX_CACHE_SLOTS`]; beyond that the oldest occupant of
/// the key's slot is overwritten. Conflicts never trigger growth, the first
/// conflicting slot is reused.
pub fn candle_overflow_listener(reason: OverflowReason, size: usize, num_conflicts: usize) -> bool {
    let allow = match reason {
        OverflowReason::Full => size < MAX_CACHE_SLOTS,
        OverflowReason::TooManyConflicts => false,
    };
    trace!(?reason, size, num_conflicts, allow, "candle cache overflow");
    allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_grows_below_ceiling() {
        assert!(candle_overflow_listener(OverflowReason::Full, 0, 0));
        assert!(candle_overflow_listener(OverflowReason::Full, 86_399, 0));
    }

    #[test]
    fn full_denied_at_ceiling() {
        assert!(!candle_overflow_listener(OverflowReason::Full, 86_400, 0));
        assert!(!candle_overflow_listener(OverflowReason::Full, 1_000_000, 0));
    }

    #[test]
    fn conflicts_always_denied() {
        for size in [0, 10, 86_399, 86_400, 200_000] {
            assert!(!candle_overflow_listener(OverflowReason::TooManyConflicts, size, 11));
        }
    }
}
