//! Indicator parameters.

pub mod drawer;
pub mod indicator;
pub mod value_type;

pub use drawer::DrawerParams;
pub use indicator::{IndicatorParams, IndicatorType};
pub use value_type::DataValueType;
