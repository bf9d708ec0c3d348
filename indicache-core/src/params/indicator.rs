//! Base parameters shared by every indicator.

use super::value_type::DataValueType;
use crate::domain::Timeframe;
use crate::fingerprint::ParamsHash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which indicator a parameter set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    #[default]
    Candle,
    Drawer,
    Custom,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndicatorType::Candle => "candle",
            IndicatorType::Drawer => "drawer",
            IndicatorType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Indicator configuration.
///
/// Fixed at construction; the setters exist for builders and config
/// loading, not for changing a live indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub name: String,
    pub itype: IndicatorType,
    /// Number of output channels (modes) per entry.
    pub max_modes: usize,
    /// Default lookback offset for value access.
    pub shift: usize,
    pub timeframe: Timeframe,
    pub data_value_type: DataValueType,
    /// Output mode of the data source to read. `None` reads the source mode
    /// matching each of this indicator's modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_mode: Option<usize>,
    pub custom_indicator_name: String,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            name: String::new(),
            itype: IndicatorType::Candle,
            max_modes: 1,
            shift: 0,
            timeframe: Timeframe::Current,
            data_value_type: DataValueType::Double,
            source_mode: None,
            custom_indicator_name: String::new(),
        }
    }
}

impl IndicatorParams {
    pub fn new(itype: IndicatorType, shift: usize) -> Self {
        Self {
            itype,
            shift,
            ..Self::default()
        }
    }

    pub fn with_modes(mut self, max_modes: usize) -> Self {
        self.max_modes = max_modes;
        self
    }

    pub fn with_data_value_type(mut self, data_value_type: DataValueType) -> Self {
        self.data_value_type = data_value_type;
        self
    }

    /// Reads every mode from output `mode` of the data source.
    pub fn with_source_mode(mut self, mode: usize) -> Self {
        self.source_mode = Some(mode);
        self
    }

    pub fn set_shift(&mut self, shift: usize) {
        self.shift = shift;
    }

    pub fn set_max_modes(&mut self, max_modes: usize) {
        self.max_modes = max_modes;
    }

    pub fn set_data_value_type(&mut self, data_value_type: DataValueType) {
        self.data_value_type = data_value_type;
    }

    pub fn set_indicator_type(&mut self, itype: IndicatorType) {
        self.itype = itype;
    }

    pub fn set_custom_indicator_name(&mut self, name: impl Into<String>) {
        self.custom_indicator_name = name.into();
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    /// Display name: explicit name, else custom indicator name, else type.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else if !self.custom_indicator_name.is_empty() {
            self.custom_indicator_name.clone()
        } else {
            self.itype.to_string()
        }
    }

    /// Identity of this exact parameter set.
    pub fn fingerprint(&self) -> ParamsHash {
        ParamsHash::of(self)
    }
}
