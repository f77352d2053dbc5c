//! Bollinger Bands (SMA middle band, k standard deviations either side) and %B.
//!
//! - Middle: SMA(series, period) (zero-filled lookback)
//! - Upper/Lower: middle ± k · RollingStd(series, period), sample std
//!
//! Where the middle is 0 or the std is NaN, both bands are 0.
//! Invalid parameters (`period == 0`, `k <= 0`) or empty input return
//! zero-filled bands of the input length rather than an empty result.
//! Lookback: period - 1.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{rejected, IndicatorError};
use crate::indicators::sma::sma;
use crate::indicators::window::rolling_std;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(series: &[f64], period: usize, k: f64) -> BollingerBands {
    let n = series.len();
    let mut bands = BollingerBands {
        upper: vec![0.0; n],
        middle: vec![0.0; n],
        lower: vec![0.0; n],
    };

    let invalid = if period == 0 {
        Some(IndicatorError::InvalidParameter {
            name: "period",
            value: 0.0,
        })
    } else if k <= 0.0 || k.is_nan() {
        Some(IndicatorError::InvalidParameter { name: "k", value: k })
    } else if n == 0 {
        Some(IndicatorError::EmptyInput)
    } else {
        None
    };
    if let Some(e) = invalid {
        rejected("bollinger", e);
        return bands;
    }

    bands.middle = sma(series, period);
    let std = rolling_std(series, period);
    for i in 0..n {
        let mid = bands.middle[i];
        if mid == 0.0 || std[i].is_nan() {
            continue;
        }
        let width = k * std[i];
        bands.upper[i] = mid + width;
        bands.lower[i] = mid - width;
    }
    bands
}

/// Bollinger %B over BB(20, 2): (x - lower) / (upper - lower) · 100,
/// 0 where the bands coincide.
pub fn percent_b(series: &[f64]) -> Vec<f64> {
    let bands = bollinger(series, 20, 2.0);
    series
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let width = bands.upper[i] - bands.lower[i];
            if width == 0.0 {
                0.0
            } else {
                (x - bands.lower[i]) / width * 100.0
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let bands = bollinger(&bars.close, self.period, self.multiplier);
        IndicatorOutput::new()
            .with("upper", bands.upper)
            .with("middle", bands.middle)
            .with("lower", bands.lower)
    }
}

/// Bollinger %B over the standard BB(20, 2) on close.
#[derive(Debug, Clone, Default)]
pub struct PercentB;

impl Indicator for PercentB {
    fn name(&self) -> &str {
        "percent_b"
    }

    fn lookback(&self) -> usize {
        19
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(percent_b(&bars.close))
    }
}
