//! Timestamp-ordered bar history.

use super::applied_price::AppliedPrice;
use super::bar::Bar;

/// Bars sorted by ascending timestamp, one bar per timestamp.
///
/// Shift 0 is the newest bar, shift 1 the one before it, and so on.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Sorts `bars` by timestamp. When a timestamp repeats, the bar given
    /// last wins.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.reverse();
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Index of the bar opening exactly at `timestamp`.
    pub fn index_of(&self, timestamp: i64) -> Option<usize> {
        self.bars
            .binary_search_by_key(&timestamp, |b| b.timestamp)
            .ok()
    }

    /// Timestamp of the bar `shift` bars back from the newest.
    pub fn timestamp_at(&self, shift: usize) -> Option<i64> {
        let index = self.bars.len().checked_sub(shift + 1)?;
        Some(self.bars[index].timestamp)
    }

    /// `price` applied to the bar at `index`.
    pub fn applied(&self, price: AppliedPrice, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| price.apply(b))
    }

    /// Appends a bar newer than every stored one. Returns false (and stores
    /// nothing) if the timestamp is not strictly increasing.
    pub fn push(&mut self, bar: Bar) -> bool {
        if let Some(last) = self.bars.last() {
            if bar.timestamp <= last.timestamp {
                return false;
            }
        }
        self.bars.push(bar);
        true
    }
}
