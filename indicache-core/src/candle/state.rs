//! Readiness flags of an indicator instance.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorState {
    /// Set until an entry has been computed and cached since the last change.
    pub is_changed: bool,
    /// False after a failed value fetch, true again after the next cached entry.
    pub is_ready: bool,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self {
            is_changed: true,
            is_ready: false,
        }
    }
}
