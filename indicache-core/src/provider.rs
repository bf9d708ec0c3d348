//! Value provider trait.
//!
//! A provider produces the raw value of one indicator mode at one timestamp.
//! The candle cache decides which numeric kind to ask for; providers that
//! compute in `f64` only implement `raw_value` and get the saturating
//! narrowing for free.

use crate::entry::{EntryValue, ValueKind};
use crate::error::ProviderError;

pub trait ValueProvider {
    /// Raw reading for `mode` at `timestamp`.
    ///
    /// `f64::MAX` is the "empty value" marker for warm-up or missing history.
    fn raw_value(&mut self, mode: usize, timestamp: i64) -> Result<f64, ProviderError>;

    /// Reading for `mode` at `timestamp` expressed as `kind`.
    fn value(
        &mut self,
        mode: usize,
        timestamp: i64,
        kind: ValueKind,
    ) -> Result<EntryValue, ProviderError> {
        self.raw_value(mode, timestamp)
            .map(|raw| EntryValue::from_f64(kind, raw))
    }

    /// Timestamp of the bar `shift` bars back from the newest one.
    fn timestamp_at(&self, shift: usize) -> Option<i64>;
}

impl<P: ValueProvider + ?Sized> ValueProvider for Box<P> {
    fn raw_value(&mut self, mode: usize, timestamp: i64) -> Result<f64, ProviderError> {
        (**self).raw_value(mode, timestamp)
    }

    fn value(
        &mut self,
        mode: usize,
        timestamp: i64,
        kind: ValueKind,
    ) -> Result<EntryValue, ProviderError> {
        (**self).value(mode, timestamp, kind)
    }

    fn timestamp_at(&self, shift: usize) -> Option<i64> {
        (**self).timestamp_at(shift)
    }
}
