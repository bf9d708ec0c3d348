//! Parameters of the Drawer example indicator.

use super::indicator::{IndicatorParams, IndicatorType};
use super::value_type::DataValueType;
use crate::domain::{AppliedPrice, Timeframe};
use crate::fingerprint::ParamsHash;
use serde::{Deserialize, Serialize};

pub const DRAWER_DEFAULT_PERIOD: u32 = 10;
pub const DRAWER_CUSTOM_NAME: &str = "Examples\\Drawer";

/// Drawer configuration: smoothing period and the price it is applied to.
///
/// Serializes as `period`, `applied_price`, then the base parameters
/// nested under `indicator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerParams {
    pub period: u32,
    pub applied_price: AppliedPrice,
    pub indicator: IndicatorParams,
}

impl Default for DrawerParams {
    fn default() -> Self {
        Self::new(DRAWER_DEFAULT_PERIOD, AppliedPrice::Close)
    }
}

impl DrawerParams {
    pub fn new(period: u32, applied_price: AppliedPrice) -> Self {
        let mut indicator = IndicatorParams::new(IndicatorType::Drawer, 0);
        indicator.set_max_modes(1);
        indicator.set_custom_indicator_name(DRAWER_CUSTOM_NAME);
        indicator.set_data_value_type(DataValueType::Double);
        Self {
            period,
            applied_price,
            indicator,
        }
    }

    /// Copy of `other` running on `timeframe`.
    pub fn with_timeframe(other: &DrawerParams, timeframe: Timeframe) -> Self {
        let mut params = other.clone();
        params.indicator.set_timeframe(timeframe);
        params
    }

    pub fn fingerprint(&self) -> ParamsHash {
        ParamsHash::of(self)
    }
}
