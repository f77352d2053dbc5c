//! Weighted (WMA) and Hull (HMA) moving averages.
//!
//! WMA weights the trailing `period` values 1..=period, newest heaviest.
//! Lookback: period - 1, zero-filled; a window holding NaN reads NaN.
//!
//! HMA(length) = WMA(2·WMA(x, length/2) - WMA(x, length), floor(sqrt(length))),
//! with the inner difference taken only where the full-length WMA is valid.
//! Lookback: (length - 1) + (floor(sqrt(length)) - 1), zero-filled. A zero
//! length falls back to 10.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{rejected, require_period};

pub const DEFAULT_HMA_LENGTH: usize = 10;

/// Linearly weighted moving average. `period == 0` → empty; a series shorter
/// than the period → all zeros.
pub fn wma(series: &[f64], period: usize) -> Vec<f64> {
    if let Err(e) = require_period("period", period, 1) {
        rejected("wma", e);
        return Vec::new();
    }

    let n = series.len();
    let mut result = vec![0.0; n];
    if n < period {
        return result;
    }

    let mut nan_prefix = Vec::with_capacity(n + 1);
    nan_prefix.push(0usize);
    for x in series {
        let last = nan_prefix[nan_prefix.len() - 1];
        nan_prefix.push(last + usize::from(x.is_nan()));
    }

    let p = period as f64;
    let denominator = p * (p + 1.0) / 2.0;
    let mut plain = 0.0;
    let mut weighted = 0.0;
    let mut stale = true;
    for i in (period - 1)..n {
        let start = i + 1 - period;
        if nan_prefix[i + 1] > nan_prefix[start] {
            result[i] = f64::NAN;
            stale = true;
            continue;
        }
        if stale {
            let window = &series[start..=i];
            plain = window.iter().sum();
            weighted = window
                .iter()
                .enumerate()
                .map(|(k, x)| (k + 1) as f64 * x)
                .sum();
            stale = false;
        } else {
            weighted += p * series[i] - plain;
            plain += series[i] - series[i - period];
        }
        result[i] = weighted / denominator;
    }
    result
}

/// Leading zero-filled bars of [`hma`] for `length` (after the default
/// substitution).
pub fn hma_lookback(length: usize) -> usize {
    let (length, _, root) = hma_spans(length);
    (length - 1).saturating_add(root - 1)
}

fn hma_spans(length: usize) -> (usize, usize, usize) {
    let length = if length == 0 { DEFAULT_HMA_LENGTH } else { length };
    let half = (length / 2).max(1);
    let root = ((length as f64).sqrt() as usize).max(1);
    (length, half, root)
}

/// Hull moving average. Too little history yields all zeros.
pub fn hma(series: &[f64], length: usize) -> Vec<f64> {
    let (length, half, root) = hma_spans(length);
    let n = series.len();
    let mut result = vec![0.0; n];
    if n <= hma_lookback(length) {
        return result;
    }

    let full = wma(series, length);
    let fast = wma(series, half);
    let start = length - 1;
    let diff: Vec<f64> = (start..n).map(|i| 2.0 * fast[i] - full[i]).collect();
    for (offset, v) in wma(&diff, root).into_iter().enumerate().skip(root - 1) {
        result[start + offset] = v;
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightedKind {
    Wma,
    Hull,
}

#[derive(Debug, Clone)]
pub struct Weighted {
    kind: WeightedKind,
    period: usize,
    name: String,
}

impl Weighted {
    pub fn wma(period: usize) -> Self {
        Self {
            kind: WeightedKind::Wma,
            period,
            name: format!("wma_{period}"),
        }
    }

    pub fn hull(length: usize) -> Self {
        let (length, _, _) = hma_spans(length);
        Self {
            kind: WeightedKind::Hull,
            period: length,
            name: format!("hma_{length}"),
        }
    }
}

impl Indicator for Weighted {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.kind {
            WeightedKind::Wma => self.period.saturating_sub(1),
            WeightedKind::Hull => hma_lookback(self.period),
        }
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.kind {
            WeightedKind::Wma => wma(&bars.close, self.period),
            WeightedKind::Hull => hma(&bars.close, self.period),
        };
        IndicatorOutput::single(values)
    }
}
