//! Indicache Core: per-timestamp indicator entry cache.
//!
//! This crate contains:
//! - Indicator data entries (per-mode numeric values + status flags)
//! - Indicator parameters, including the Drawer example indicator
//! - An open-addressing keyed buffer with a pluggable overflow policy
//! - The candle cache: lazy resolution, validation, caching of entries
//! - The value provider trait and the Drawer provider over bar series
//! - TOML configuration and parameter fingerprints

pub mod buffer;
pub mod candle;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod params;
pub mod provider;

pub use candle::IndicatorCandle;
pub use entry::{EntryFlags, EntryValue, IndicatorDataEntry, ValueKind};
pub use error::{ConfigError, EntryError, IndicatorError, ProviderError};
pub use params::{DataValueType, DrawerParams, IndicatorParams, IndicatorType};
pub use provider::ValueProvider;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types can move to and be shared across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<IndicatorDataEntry>();
        require_sync::<IndicatorDataEntry>();
        require_send::<IndicatorParams>();
        require_sync::<IndicatorParams>();
        require_send::<DrawerParams>();
        require_sync::<DrawerParams>();
        require_send::<buffer::KeyedBuffer<IndicatorDataEntry>>();
        require_sync::<buffer::KeyedBuffer<IndicatorDataEntry>>();
        require_send::<indicators::Drawer>();
        require_sync::<indicators::Drawer>();
        require_send::<IndicatorCandle<indicators::Drawer>>();
        require_sync::<IndicatorCandle<indicators::Drawer>>();
        require_send::<config::CandleConfig>();
        require_sync::<config::CandleConfig>();
    }
}
