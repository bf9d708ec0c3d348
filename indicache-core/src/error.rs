//! Structured error types.

use crate::entry::IndicatorDataEntry;
use crate::params::DataValueType;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a value provider while fetching one value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("no bar at timestamp {timestamp}")]
    NoBar { timestamp: i64 },

    #[error("mode {mode} out of range (indicator has {max} modes)")]
    ModeOutOfRange { mode: usize, max: usize },

    #[error("no valid data at timestamp {timestamp}")]
    NoData { timestamp: i64 },

    #[error("provider error: {0}")]
    Other(String),
}

/// Errors raised while resolving an indicator entry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid parameter: data value type '{0}' cannot be fetched")]
    InvalidParameter(DataValueType),

    #[error("value provider failed for mode {mode} at {timestamp}: {source}")]
    Provider {
        mode: usize,
        timestamp: i64,
        #[source]
        source: ProviderError,
    },
}

/// Entry resolution that hit an error.
///
/// Carries the entry as resolved, so callers can still inspect whatever
/// values were fetched.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("entry at {} resolved with error: {source}", .entry.timestamp)]
pub struct EntryError {
    pub entry: IndicatorDataEntry,
    #[source]
    pub source: IndicatorError,
}

impl EntryError {
    pub fn into_entry(self) -> IndicatorDataEntry {
        self.entry
    }
}

/// Errors loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = IndicatorError::Provider {
            mode: 1,
            timestamp: 60,
            source: ProviderError::NoBar { timestamp: 60 },
        };
        assert_eq!(
            err.to_string(),
            "value provider failed for mode 1 at 60: no bar at timestamp 60"
        );
        assert_eq!(
            IndicatorError::InvalidParameter(DataValueType::String).to_string(),
            "invalid parameter: data value type 'string' cannot be fetched"
        );
    }

    #[test]
    fn entry_error_gives_back_entry() {
        let err = EntryError {
            entry: IndicatorDataEntry::new(42, 1),
            source: IndicatorError::InvalidParameter(DataValueType::UChar),
        };
        assert!(err.to_string().starts_with("entry at 42"));
        assert_eq!(err.into_entry().timestamp, 42);
    }
}
