//! Drawer: example indicator over an applied price.
//!
//! Relative strength of the applied price with Wilder (SMMA) smoothing of
//! average gains and losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! The first value is at bar index `period`; earlier bars report the
//! `f64::MAX` empty-value marker.
//! Edge cases: avg_loss == 0 → 100; avg_gain == 0 → 0; both 0 → 50.

use crate::candle::IndicatorCandle;
use crate::config::BufferConfig;
use crate::domain::{Bar, BarSeries};
use crate::error::ProviderError;
use crate::params::DrawerParams;
use crate::provider::ValueProvider;
use serde::{Deserialize, Serialize};

/// Smoothed average gain and loss at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainLossData {
    pub avg_gain: f64,
    pub avg_loss: f64,
}

impl GainLossData {
    pub fn rsi(&self) -> f64 {
        if self.avg_loss == 0.0 && self.avg_gain == 0.0 {
            50.0
        } else if self.avg_loss == 0.0 {
            100.0
        } else if self.avg_gain == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Drawer {
    params: DrawerParams,
    series: BarSeries,
    /// `smoothed[k]` holds the averages at bar index `period + k`.
    smoothed: Vec<GainLossData>,
}

impl Drawer {
    pub fn new(params: DrawerParams, series: BarSeries) -> Self {
        assert!(params.period >= 1, "Drawer period must be >= 1");
        Self {
            params,
            series,
            smoothed: Vec::new(),
        }
    }

    /// Drawer wrapped in a candle cache sized by `buffer`.
    pub fn candle(
        params: DrawerParams,
        series: BarSeries,
        buffer: &BufferConfig,
    ) -> IndicatorCandle<Drawer> {
        let indicator = params.indicator.clone();
        IndicatorCandle::from_parts(indicator, Drawer::new(params, series), buffer)
    }

    pub fn params(&self) -> &DrawerParams {
        &self.params
    }

    pub fn series(&self) -> &BarSeries {
        &self.series
    }

    /// Appends a newer bar. Earlier values never depend on later bars, so
    /// nothing computed so far is invalidated.
    pub fn push_bar(&mut self, bar: Bar) -> bool {
        self.series.push(bar)
    }

    /// Number of bars before the first value.
    pub fn lookback(&self) -> usize {
        self.params.period as usize
    }

    /// Smoothed averages at bar `index`, `None` during warm-up.
    pub fn gain_loss(&mut self, index: usize) -> Option<GainLossData> {
        let period = self.lookback();
        if index < period || index >= self.series.len() {
            return None;
        }

        if self.smoothed.is_empty() {
            let mut seed = GainLossData::default();
            for i in 1..=period {
                let (gain, loss) = split_change(self.change(i));
                seed.avg_gain += gain;
                seed.avg_loss += loss;
            }
            seed.avg_gain /= period as f64;
            seed.avg_loss /= period as f64;
            self.smoothed.push(seed);
        }

        let n = period as f64;
        while period + self.smoothed.len() <= index {
            let i = period + self.smoothed.len();
            let prev = self.smoothed[self.smoothed.len() - 1];
            let (gain, loss) = split_change(self.change(i));
            self.smoothed.push(GainLossData {
                avg_gain: (prev.avg_gain * (n - 1.0) + gain) / n,
                avg_loss: (prev.avg_loss * (n - 1.0) + loss) / n,
            });
        }

        Some(self.smoothed[index - period])
    }

    fn change(&self, index: usize) -> f64 {
        let price = self.params.applied_price;
        let curr = self.series.applied(price, index).unwrap_or(f64::NAN);
        let prev = self.series.applied(price, index - 1).unwrap_or(f64::NAN);
        curr - prev
    }
}

/// Gain and loss parts of a price change; NaN stays NaN in both.
fn split_change(change: f64) -> (f64, f64) {
    if change.is_nan() {
        (f64::NAN, f64::NAN)
    } else if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

impl ValueProvider for Drawer {
    fn raw_value(&mut self, mode: usize, timestamp: i64) -> Result<f64, ProviderError> {
        let max = self.params.indicator.max_modes;
        if mode >= max {
            return Err(ProviderError::ModeOutOfRange { mode, max });
        }
        let index = self
            .series
            .index_of(timestamp)
            .ok_or(ProviderError::NoBar { timestamp })?;

        // A void bar leaves NaN averages from there on; report those as empty.
        match self.gain_loss(index) {
            Some(gl) if !gl.avg_gain.is_nan() && !gl.avg_loss.is_nan() => Ok(gl.rsi()),
            _ => Ok(f64::MAX),
        }
    }

    fn timestamp_at(&self, shift: usize) -> Option<i64> {
        self.series.timestamp_at(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppliedPrice;
    use crate::entry::EntryValue;
    use crate::indicators::{assert_approx, make_series};

    fn drawer(closes: &[f64], period: u32) -> Drawer {
        Drawer::new(DrawerParams::new(period, AppliedPrice::Close), make_series(closes))
    }

    #[test]
    fn warm_up_reports_empty_value() {
        let mut d = drawer(&[100.0, 101.0, 102.0, 103.0], 3);
        let stamps: Vec<i64> = d.series().bars().iter().map(|b| b.timestamp).collect();
        for &ts in &stamps[..3] {
            assert_eq!(d.raw_value(0, ts), Ok(f64::MAX));
        }
        assert_ne!(d.raw_value(0, stamps[3]), Ok(f64::MAX));
    }

    #[test]
    fn all_gains_is_100() {
        let mut d = drawer(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0], 3);
        let ts = d.series().timestamp_at(0).unwrap();
        assert_approx(d.raw_value(0, ts).unwrap(), 100.0, 1e-9);
    }

    #[test]
    fn seed_then_wilder_smoothing() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        let mut d = drawer(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);
        let seed = d.gain_loss(3).unwrap();
        assert_approx(seed.avg_gain, 0.34 / 3.0, 1e-12);
        assert_approx(seed.avg_loss, 0.73 / 3.0, 1e-12);

        let next = d.gain_loss(4).unwrap();
        assert_approx(next.avg_gain, (seed.avg_gain * 2.0 + 0.72) / 3.0, 1e-12);
        assert_approx(next.avg_loss, seed.avg_loss * 2.0 / 3.0, 1e-12);
        assert_approx(
            next.rsi(),
            100.0 - 100.0 / (1.0 + next.avg_gain / next.avg_loss),
            1e-12,
        );
    }

    #[test]
    fn rsi_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let mut d = drawer(&closes, 3);
        for index in 3..closes.len() {
            let v = d.gain_loss(index).unwrap().rsi();
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {index}: {v}");
        }
    }

    #[test]
    fn unknown_timestamp_and_mode_are_errors() {
        let mut d = drawer(&[1.0, 2.0, 3.0], 1);
        assert_eq!(d.raw_value(0, 7), Err(ProviderError::NoBar { timestamp: 7 }));
        let ts = d.series().timestamp_at(0).unwrap();
        assert_eq!(
            d.raw_value(1, ts),
            Err(ProviderError::ModeOutOfRange { mode: 1, max: 1 })
        );
    }

    #[test]
    fn void_bar_reports_empty_value() {
        let mut series = make_series(&[10.0, 11.0, 12.0, 13.0]).bars().to_vec();
        series[2].close = f64::NAN;
        let params = DrawerParams::new(2, AppliedPrice::Close);
        let mut d = Drawer::new(params, BarSeries::new(series));
        let ts = d.series().timestamp_at(0).unwrap();
        assert_eq!(d.raw_value(0, ts), Ok(f64::MAX));
    }

    #[test]
    fn pushed_bars_extend_history() {
        let mut d = drawer(&[10.0, 11.0, 10.5], 2);
        let last = d.series().timestamp_at(0).unwrap();
        assert!(d.push_bar(Bar {
            timestamp: last + 60,
            open: 10.5,
            high: 12.5,
            low: 10.0,
            close: 12.0,
            volume: 0,
        }));
        assert!(d.gain_loss(3).is_some());
    }

    #[test]
    fn candle_caches_after_warm_up() {
        let series = make_series(&[100.0, 102.0, 101.0, 103.0, 104.0]);
        let stamps: Vec<i64> = series.bars().iter().map(|b| b.timestamp).collect();
        let params = DrawerParams::new(2, AppliedPrice::Close);
        let mut candle = Drawer::candle(params, series, &BufferConfig::default());

        assert!(candle.get_entry(stamps[1]).has_insufficient_data());
        let entry = candle.get_entry(stamps[4]);
        assert!(entry.is_valid());
        assert!(matches!(entry[0], EntryValue::Double(v) if v > 0.0 && v < 100.0));
        assert_eq!(candle.cached_len(), 1);
        assert_eq!(candle.get_entry_value(0, None), Some(entry[0]));
    }
}
