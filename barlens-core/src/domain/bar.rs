//! OHLCV bars, row-oriented and columnar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLCV field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic OHLC sanity check: high >= low and both bracket open/close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }
}

/// Parallel OHLCV columns for one calculation call.
///
/// Indicators read the columns they need as slices. All columns are expected
/// to share one length; indicators check the columns they consume and reject
/// a mismatch through their result shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarSet {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl BarSet {
    pub fn new(
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Split a row-oriented bar history into columns.
    ///
    /// Void or inconsistent bars are kept as they are (indicators decide how
    /// NaN flows through them) but are reported once as a warning.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut set = Self {
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };
        let mut void = 0usize;
        let mut insane = 0usize;
        for bar in bars {
            if bar.is_void() {
                void += 1;
            } else if !bar.is_sane() {
                insane += 1;
            }
            set.open.push(bar.open);
            set.high.push(bar.high);
            set.low.push(bar.low);
            set.close.push(bar.close);
            set.volume.push(bar.volume);
        }
        if void > 0 || insane > 0 {
            tracing::warn!(bars = bars.len(), void, insane, "bar history has suspect bars");
        }
        set
    }

    /// Length of the close column (the reference column).
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// The first `len` bars of every column (shorter columns are kept whole).
    pub fn head(&self, len: usize) -> Self {
        let take = |col: &[f64]| col[..len.min(col.len())].to_vec();
        Self {
            open: take(&self.open),
            high: take(&self.high),
            low: take(&self.low),
            close: take(&self.close),
            volume: take(&self.volume),
        }
    }

    /// True when every column has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.close.len();
        self.open.len() == n && self.high.len() == n && self.low.len() == n && self.volume.len() == n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.open = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 97.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_set_from_bars_keeps_suspect_bars() {
        let mut void = sample_bar();
        void.close = f64::NAN;
        let mut inverted = sample_bar();
        inverted.low = 110.0;
        let set = BarSet::from_bars(&[sample_bar(), void, inverted]);
        assert_eq!(set.len(), 3);
        assert!(set.close[1].is_nan());
        assert_eq!(set.low[2], 110.0);
    }

    #[test]
    fn bar_set_from_bars() {
        let bars = vec![sample_bar(), sample_bar()];
        let set = BarSet::from_bars(&bars);
        assert_eq!(set.len(), 2);
        assert!(set.is_aligned());
        assert_eq!(set.high, vec![105.0, 105.0]);
        assert_eq!(set.volume, vec![50_000.0, 50_000.0]);
    }

    #[test]
    fn bar_set_detects_misalignment() {
        let set = BarSet::new(
            vec![1.0; 3],
            vec![1.0; 3],
            vec![1.0; 2],
            vec![1.0; 3],
            vec![1.0; 3],
        );
        assert!(!set.is_aligned());
    }

    #[test]
    fn bar_set_head() {
        let set = BarSet::new(
            vec![1.0, 2.0, 3.0],
            vec![1.0; 3],
            vec![1.0; 2],
            vec![4.0, 5.0, 6.0],
            vec![1.0; 3],
        );
        let head = set.head(2);
        assert_eq!(head.close, vec![4.0, 5.0]);
        assert!(head.is_aligned());
        assert_eq!(set.head(10).len(), 3);
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
