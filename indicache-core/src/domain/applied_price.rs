//! Price selector applied to a bar before an indicator sees it.

use super::bar::Bar;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedPrice {
    #[default]
    Close,
    Open,
    High,
    Low,
    /// (high + low) / 2
    Median,
    /// (high + low + close) / 3
    Typical,
    /// (high + low + 2 * close) / 4
    Weighted,
}

impl AppliedPrice {
    pub fn apply(self, bar: &Bar) -> f64 {
        match self {
            AppliedPrice::Close => bar.close,
            AppliedPrice::Open => bar.open,
            AppliedPrice::High => bar.high,
            AppliedPrice::Low => bar.low,
            AppliedPrice::Median => (bar.high + bar.low) / 2.0,
            AppliedPrice::Typical => (bar.high + bar.low + bar.close) / 3.0,
            AppliedPrice::Weighted => (bar.high + bar.low + 2.0 * bar.close) / 4.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppliedPrice::Close => "close",
            AppliedPrice::Open => "open",
            AppliedPrice::High => "high",
            AppliedPrice::Low => "low",
            AppliedPrice::Median => "median",
            AppliedPrice::Typical => "typical",
            AppliedPrice::Weighted => "weighted",
        }
    }
}

impl fmt::Display for AppliedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppliedPrice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "close" => Ok(AppliedPrice::Close),
            "open" => Ok(AppliedPrice::Open),
            "high" => Ok(AppliedPrice::High),
            "low" => Ok(AppliedPrice::Low),
            "median" => Ok(AppliedPrice::Median),
            "typical" => Ok(AppliedPrice::Typical),
            "weighted" => Ok(AppliedPrice::Weighted),
            other => Err(format!("unknown applied price '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Bar {
        Bar {
            timestamp: 60,
            open: 10.0,
            high: 14.0,
            low: 8.0,
            close: 12.0,
            volume: 100,
        }
    }

    #[test]
    fn raw_prices() {
        let b = bar();
        assert_eq!(AppliedPrice::Open.apply(&b), 10.0);
        assert_eq!(AppliedPrice::High.apply(&b), 14.0);
        assert_eq!(AppliedPrice::Low.apply(&b), 8.0);
        assert_eq!(AppliedPrice::Close.apply(&b), 12.0);
    }

    #[test]
    fn derived_prices() {
        let b = bar();
        assert_eq!(AppliedPrice::Median.apply(&b), 11.0);
        assert_eq!(AppliedPrice::Typical.apply(&b), 34.0 / 3.0);
        assert_eq!(AppliedPrice::Weighted.apply(&b), 11.5);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Typical".parse::<AppliedPrice>(), Ok(AppliedPrice::Typical));
        assert!("vwap".parse::<AppliedPrice>().is_err());
    }
}
