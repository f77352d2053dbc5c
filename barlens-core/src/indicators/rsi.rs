//! Relative Strength Index (RSI) and its volume-weighted variant.
//!
//! Wilder RSI: the seed averages are the simple means of gains and losses over
//! changes 1..=period, then avg = (avg*(period-1) + current) / period.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: period, zero-filled.
//! Edge cases: avg_loss == 0 → 100, or 50 when avg_gain is also 0.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_len, require_period};

/// Wilder RSI. `period == 0` → empty; `len <= period` → all zeros.
pub fn rsi(series: &[f64], period: usize) -> Vec<f64> {
    if let Err(e) = require_period("period", period, 1) {
        rejected("rsi", e);
        return Vec::new();
    }

    let n = series.len();
    let mut result = vec![0.0; n];
    if n <= period {
        return result;
    }

    let (gains, losses) = gains_and_losses(series, |_| 1.0);

    let p = period as f64;
    let mut avg_gain = gains[1..=period].iter().sum::<f64>() / p;
    let mut avg_loss = losses[1..=period].iter().sum::<f64>() / p;
    result[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in (period + 1)..n {
        avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
        result[i] = rsi_from_averages(avg_gain, avg_loss);
    }

    result
}

/// Volume-weighted RSI over trailing sums of volume-weighted gains/losses.
///
/// Lookback: period, zero-filled. A window with no losses reads 100.
/// Mismatched lengths, `period == 0` or `len < period` → empty.
pub fn volume_weighted_rsi(close: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let checked = aligned_len(&[close, volume]).and_then(|n| {
        require_period("period", period, 1)?;
        require_len(n, period)
    });
    if let Err(e) = checked {
        rejected("volume_weighted_rsi", e);
        return Vec::new();
    }

    let n = close.len();
    let (gains, losses) = gains_and_losses(close, |i| volume[i]);
    let mut result = vec![0.0; n];
    if n <= period {
        return result;
    }

    let mut sum_gain: f64 = gains[1..=period].iter().sum();
    let mut sum_loss: f64 = losses[1..=period].iter().sum();
    for i in period..n {
        if i > period {
            sum_gain += gains[i] - gains[i - period];
            sum_loss += losses[i] - losses[i - period];
        }
        result[i] = if sum_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + sum_gain / sum_loss)
        };
    }

    result
}

/// Split bar-to-bar changes into weighted gains and losses (index 0 is 0).
fn gains_and_losses(series: &[f64], weight: impl Fn(usize) -> f64) -> (Vec<f64>, Vec<f64>) {
    let n = series.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let change = series[i] - series[i - 1];
        if change > 0.0 {
            gains[i] = change * weight(i);
        } else if change < 0.0 {
            losses[i] = -change * weight(i);
        }
    }
    (gains, losses)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0 // no movement
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Which RSI flavour an [`Rsi`] instance computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiWeighting {
    Wilder,
    Volume,
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    weighting: RsiWeighting,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            weighting: RsiWeighting::Wilder,
            name: format!("rsi_{period}"),
        }
    }

    pub fn volume_weighted(period: usize) -> Self {
        Self {
            period,
            weighting: RsiWeighting::Volume,
            name: format!("vwrsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.weighting {
            RsiWeighting::Wilder => rsi(&bars.close, self.period),
            RsiWeighting::Volume => volume_weighted_rsi(&bars.close, &bars.volume, self.period),
        };
        IndicatorOutput::single(values)
    }
}
