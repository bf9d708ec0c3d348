//! TOML configuration for candle caches.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! [indicator]
//! max_modes = 2
//! data_value_type = "float"
//!
//! [buffer]
//! initial_capacity = 1024
//! ```

use crate::buffer::{DEFAULT_MAX_CONFLICTS, MAX_CACHE_SLOTS};
use crate::error::ConfigError;
use crate::params::{DrawerParams, IndicatorParams};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Sizing of the keyed buffer behind a candle cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Slots allocated up front.
    pub initial_capacity: usize,
    /// Probe conflicts tolerated before the overflow listener is asked.
    pub max_conflicts: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_conflicts: DEFAULT_MAX_CONFLICTS,
        }
    }
}

impl BufferConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity > MAX_CACHE_SLOTS {
            return Err(ConfigError::Invalid(format!(
                "buffer.initial_capacity {} exceeds the {MAX_CACHE_SLOTS} slot ceiling",
                self.initial_capacity
            )));
        }
        Ok(())
    }
}

/// Configuration of a generic candle indicator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleConfig {
    pub indicator: IndicatorParams,
    pub buffer: BufferConfig,
}

impl CandleConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.buffer.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path.as_ref())?;
        config.buffer.validate()?;
        Ok(config)
    }
}

/// Configuration of the Drawer indicator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub drawer: DrawerParams,
    pub buffer: BufferConfig,
}

impl DrawerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drawer.period == 0 {
            return Err(ConfigError::Invalid("drawer.period must be >= 1".into()));
        }
        self.buffer.validate()
    }

    /// Candle-level view of this config.
    pub fn candle(&self) -> CandleConfig {
        CandleConfig {
            indicator: self.drawer.indicator.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppliedPrice;
    use crate::params::DataValueType;
    use std::io::Write;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = CandleConfig::from_toml_str("").unwrap();
        assert_eq!(config, CandleConfig::default());
        assert_eq!(config.buffer.initial_capacity, 64);
        assert_eq!(config.buffer.max_conflicts, 10);
    }

    #[test]
    fn partial_sections_override() {
        let config = CandleConfig::from_toml_str(
            r#"
            [indicator]
            max_modes = 2
            data_value_type = "float"

            [buffer]
            initial_capacity = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.indicator.max_modes, 2);
        assert_eq!(config.indicator.data_value_type, DataValueType::Float);
        assert_eq!(config.buffer.initial_capacity, 1024);
        assert_eq!(config.buffer.max_conflicts, 10);
    }

    #[test]
    fn oversized_buffer_rejected() {
        let err = CandleConfig::from_toml_str("[buffer]\ninitial_capacity = 100000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = CandleConfig::from_toml_str("[indicator\nmax_modes = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn drawer_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[drawer]\nperiod = 14\napplied_price = \"typical\"\n\n[buffer]\nmax_conflicts = 4"
        )
        .unwrap();

        let config = DrawerConfig::load(file.path()).unwrap();
        assert_eq!(config.drawer.period, 14);
        assert_eq!(config.drawer.applied_price, AppliedPrice::Typical);
        assert_eq!(config.drawer.indicator.custom_indicator_name, "Examples\\Drawer");
        assert_eq!(config.candle().buffer.max_conflicts, 4);
    }

    #[test]
    fn drawer_zero_period_rejected() {
        let err = DrawerConfig::from_toml_str("[drawer]\nperiod = 0").unwrap_err();
        assert!(err.to_string().contains("period"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CandleConfig::load("/nonexistent/indicache.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
