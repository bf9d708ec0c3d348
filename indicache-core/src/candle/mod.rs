//! Candle indicator: a per-timestamp cache of validated indicator entries.
//!
//! Entries are computed lazily from a [`ValueProvider`] the first time a
//! timestamp is requested. Only entries passing validation are stored, so a
//! warm-up reading is recomputed on the next request instead of poisoning
//! the cache.

pub mod hooks;
pub mod state;
pub mod validity;

pub use hooks::{EntryAlter, EntryValidator, SentinelValidator, TypeFlagsAlter};
pub use state::IndicatorState;
pub use validity::is_valid_entry;

use crate::buffer::{
    candle_overflow_listener, BufferFlags, BufferStore, KeyedBuffer, DEFAULT_MAX_CONFLICTS,
};
use crate::config::{BufferConfig, CandleConfig};
use crate::entry::{EntryFlags, EntryValue, IndicatorDataEntry, ValueKind};
use crate::error::{EntryError, IndicatorError, ProviderError};
use crate::params::IndicatorParams;
use crate::provider::ValueProvider;
use tracing::{debug, trace, warn};

pub struct IndicatorCandle<P, B = KeyedBuffer<IndicatorDataEntry>> {
    params: IndicatorParams,
    /// Numeric kind values are fetched as; `None` for unsupported types.
    value_kind: Option<ValueKind>,
    provider: P,
    buffer: B,
    state: IndicatorState,
    alter: Box<dyn EntryAlter>,
    validator: Box<dyn EntryValidator>,
}

impl<P: ValueProvider> IndicatorCandle<P> {
    pub fn new(params: IndicatorParams, provider: P) -> Self {
        Self::from_parts(params, provider, &BufferConfig::default())
    }

    pub fn from_config(config: &CandleConfig, provider: P) -> Self {
        Self::from_parts(config.indicator.clone(), provider, &config.buffer)
    }

    pub fn from_parts(params: IndicatorParams, provider: P, buffer: &BufferConfig) -> Self {
        let mut store = KeyedBuffer::with_capacity(buffer.initial_capacity);
        store.add_flags(BufferFlags::FILL_HOLES_UNSORTED);
        store.set_overflow_listener(candle_overflow_listener, buffer.max_conflicts);
        Self::assemble(params, provider, store)
    }
}

impl<P, B> IndicatorCandle<P, B>
where
    P: ValueProvider,
    B: BufferStore<IndicatorDataEntry>,
{
    /// Candle over a caller-supplied store, which may already hold entries.
    ///
    /// The store gets the candle overflow policy and `FILL_HOLES_UNSORTED`.
    pub fn with_buffer(params: IndicatorParams, provider: P, mut buffer: B) -> Self {
        buffer.add_flags(BufferFlags::FILL_HOLES_UNSORTED);
        buffer.set_overflow_listener(candle_overflow_listener, DEFAULT_MAX_CONFLICTS);
        Self::assemble(params, provider, buffer)
    }

    fn assemble(params: IndicatorParams, provider: P, buffer: B) -> Self {
        let value_kind = params.data_value_type.value_kind();
        Self {
            params,
            value_kind,
            provider,
            buffer,
            state: IndicatorState::default(),
            alter: Box::new(TypeFlagsAlter),
            validator: Box::new(SentinelValidator),
        }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Number of cached entries.
    pub fn cached_len(&self) -> usize {
        self.buffer.len()
    }

    /// Replaces the hook run on every freshly computed entry.
    pub fn set_entry_alter(&mut self, alter: impl EntryAlter + 'static) {
        self.alter = Box::new(alter);
    }

    /// Replaces the validity check deciding what gets cached.
    pub fn set_entry_validator(&mut self, validator: impl EntryValidator + 'static) {
        self.validator = Box::new(validator);
    }

    pub fn is_valid_entry(&self, entry: &IndicatorDataEntry) -> bool {
        self.validator.is_valid(entry)
    }

    /// Entry for `timestamp`, logging and swallowing any resolution error.
    ///
    /// A failed fetch leaves the indicator not ready. The failed mode holds
    /// its kind's max sentinel, so the default validator keeps such entries
    /// out of the cache.
    pub fn get_entry(&mut self, timestamp: i64) -> IndicatorDataEntry {
        self.try_get_entry(timestamp).unwrap_or_else(|err| {
            warn!(
                indicator = %self.params.display_name(),
                error = %err.source,
                "indicator entry resolution failed"
            );
            err.into_entry()
        })
    }

    /// Entry for `timestamp`.
    ///
    /// Each mode is read from the provider's mode of the same index, or from
    /// `params.source_mode` for every mode when that is set.
    ///
    /// Valid entries and entries tagged `INSUFFICIENT_DATA` already in the
    /// store are returned as-is. Otherwise the entry is computed; a valid one
    /// is cached, an invalid one is tagged `INSUFFICIENT_DATA` and returned
    /// uncached. Errors come back with the uncached entry attached.
    pub fn try_get_entry(&mut self, timestamp: i64) -> Result<IndicatorDataEntry, EntryError> {
        if let Some(entry) = self.buffer.get_by_key(timestamp) {
            if entry.is_valid() || entry.has_insufficient_data() {
                trace!(timestamp, "indicator cache hit");
                return Ok(entry);
            }
        }

        let modes = self.params.max_modes;
        let mut entry = IndicatorDataEntry::new(timestamp, modes);
        let mut error: Option<IndicatorError> = None;

        for mode in 0..modes {
            let Some(kind) = self.value_kind else {
                error.get_or_insert(IndicatorError::InvalidParameter(self.params.data_value_type));
                continue;
            };
            let source_mode = self.params.source_mode.unwrap_or(mode);
            match self.provider.value(source_mode, timestamp, kind) {
                Ok(value) => entry.values[mode] = value,
                Err(source) => {
                    entry.values[mode] = EntryValue::max_of(kind);
                    error.get_or_insert(IndicatorError::Provider {
                        mode,
                        timestamp,
                        source,
                    });
                }
            }
        }

        self.alter.alter(&mut entry, timestamp, &self.params);
        let valid = self.validator.is_valid(&entry);
        entry.set_flag(EntryFlags::VALID, valid);

        if valid {
            self.buffer.add(entry.clone(), timestamp);
            self.state.is_changed = false;
            self.state.is_ready = true;
            debug!(timestamp, cached = self.buffer.len(), "indicator entry cached");
        } else {
            entry.add_flags(EntryFlags::INSUFFICIENT_DATA);
            debug!(timestamp, "indicator entry has insufficient data");
        }

        match error {
            Some(source) => {
                self.state.is_ready = false;
                Err(EntryError { entry, source })
            }
            None => Ok(entry),
        }
    }

    /// Value of `mode` in the entry `shift` bars back (default: the
    /// configured shift).
    ///
    /// `None` if the provider cannot place the shift or the mode is out of
    /// range.
    pub fn get_entry_value(&mut self, mode: usize, shift: Option<usize>) -> Option<EntryValue> {
        let shift = shift.unwrap_or(self.params.shift);
        let timestamp = self.provider.timestamp_at(shift)?;
        self.get_entry(timestamp).get(mode)
    }
}

/// Candles chain: a candle serves its valid entries as values to another.
impl<P, B> ValueProvider for IndicatorCandle<P, B>
where
    P: ValueProvider,
    B: BufferStore<IndicatorDataEntry>,
{
    fn raw_value(&mut self, mode: usize, timestamp: i64) -> Result<f64, ProviderError> {
        self.value(mode, timestamp, ValueKind::Double)
            .map(|v| v.as_f64())
    }

    fn value(
        &mut self,
        mode: usize,
        timestamp: i64,
        kind: ValueKind,
    ) -> Result<EntryValue, ProviderError> {
        let entry = self.get_entry(timestamp);
        if !entry.is_valid() {
            return Err(ProviderError::NoData { timestamp });
        }
        entry
            .get(mode)
            .map(|v| v.to_kind(kind))
            .ok_or(ProviderError::ModeOutOfRange {
                mode,
                max: entry.size(),
            })
    }

    fn timestamp_at(&self, shift: usize) -> Option<i64> {
        self.provider.timestamp_at(shift)
    }
}
