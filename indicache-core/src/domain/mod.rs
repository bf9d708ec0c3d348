//! Market data types indicators are computed from.

pub mod applied_price;
pub mod bar;
pub mod series;
pub mod timeframe;

pub use applied_price::AppliedPrice;
pub use bar::Bar;
pub use series::BarSeries;
pub use timeframe::Timeframe;
