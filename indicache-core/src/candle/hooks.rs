//! Swappable entry post-processing and validation.

use super::validity::is_valid_entry;
use crate::entry::IndicatorDataEntry;
use crate::params::IndicatorParams;

/// Adjusts a freshly computed entry before it is validated.
pub trait EntryAlter: Send + Sync {
    fn alter(&self, entry: &mut IndicatorDataEntry, timestamp: i64, params: &IndicatorParams);
}

/// Decides whether a computed entry may be cached.
pub trait EntryValidator: Send + Sync {
    fn is_valid(&self, entry: &IndicatorDataEntry) -> bool;
}

/// Tags entries with the numeric-kind flags of the configured value type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeFlagsAlter;

impl EntryAlter for TypeFlagsAlter {
    fn alter(&self, entry: &mut IndicatorDataEntry, _timestamp: i64, params: &IndicatorParams) {
        entry.add_flags(params.data_value_type.type_flags());
    }
}

/// Rejects entries carrying a "no data" sentinel. See [`is_valid_entry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SentinelValidator;

impl EntryValidator for SentinelValidator {
    fn is_valid(&self, entry: &IndicatorDataEntry) -> bool {
        is_valid_entry(entry)
    }
}

impl<F> EntryAlter for F
where
    F: Fn(&mut IndicatorDataEntry, i64, &IndicatorParams) + Send + Sync,
{
    fn alter(&self, entry: &mut IndicatorDataEntry, timestamp: i64, params: &IndicatorParams) {
        self(entry, timestamp, params)
    }
}

impl<F> EntryValidator for F
where
    F: Fn(&IndicatorDataEntry) -> bool + Send + Sync,
{
    fn is_valid(&self, entry: &IndicatorDataEntry) -> bool {
        self(entry)
    }
}
