//! True Range and Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), TR[0] = high-low.
//! ATR uses Wilder smoothing: the first value is the mean of TR[0..period]
//! stored at index period-1, then ATR[t] = (ATR[t-1]*(period-1) + TR[t]) / period.
//! Lookback: period - 1, zero-filled.
//!
//! Failure shapes differ on purpose:
//! - mismatched lengths, empty input or `period == 0` → empty
//! - `len < period` → all zeros of input length

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_period, IndicatorError};
use crate::indicators::window::rolling_mean;

/// True Range series. Mismatched lengths yield an empty result.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = match aligned_len(&[high, low, close]) {
        Ok(n) => n,
        Err(e) => {
            rejected("true_range", e);
            return Vec::new();
        }
    };

    let mut tr = Vec::with_capacity(n);
    for i in 0..n {
        let range = high[i] - low[i];
        if i == 0 {
            tr.push(range);
        } else {
            let pc = close[i - 1];
            tr.push(range.max((high[i] - pc).abs()).max((low[i] - pc).abs()));
        }
    }
    tr
}

/// Apply Wilder smoothing to a series: seed = mean of the first `period`
/// values at index `period - 1`, zeros before it.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![0.0; n];
    if period == 0 || n < period {
        return result;
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = seed;

    let p = period as f64;
    let mut prev = seed;
    for i in period..n {
        prev = (prev * (p - 1.0) + values[i]) / p;
        result[i] = prev;
    }
    result
}

/// Wilder ATR.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let checked = aligned_len(&[high, low, close]).and_then(|n| {
        if n == 0 {
            return Err(IndicatorError::EmptyInput);
        }
        require_period("period", period, 1)
    });
    if let Err(e) = checked {
        rejected("atr", e);
        return Vec::new();
    }

    wilder_smooth(&true_range(high, low, close), period)
}

/// ATR smoothed with a plain SMA of True Range instead of Wilder's recursion.
/// Lookback: period - 1, NaN-filled. Mismatch or `period == 0` → empty.
pub fn atr_sma(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let checked = aligned_len(&[high, low, close]).and_then(|_| require_period("period", period, 1));
    if let Err(e) = checked {
        rejected("atr_sma", e);
        return Vec::new();
    }

    let tr = true_range(high, low, close);
    let mut result = rolling_mean(&tr, period);
    let warmup = (period - 1).min(result.len());
    for v in result.iter_mut().take(warmup) {
        *v = f64::NAN;
    }
    result
}

/// Which smoothing an [`Atr`] instance applies to True Range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtrSmoothing {
    Wilder,
    Simple,
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    smoothing: AtrSmoothing,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            smoothing: AtrSmoothing::Wilder,
            name: format!("atr_{period}"),
        }
    }

    pub fn simple(period: usize) -> Self {
        Self {
            period,
            smoothing: AtrSmoothing::Simple,
            name: format!("atr_sma_{period}"),
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.smoothing {
            AtrSmoothing::Wilder => atr(&bars.high, &bars.low, &bars.close, self.period),
            AtrSmoothing::Simple => atr_sma(&bars.high, &bars.low, &bars.close, self.period),
        };
        IndicatorOutput::single(values)
    }
}
