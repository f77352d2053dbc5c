//! Exponential Moving Average (EMA) and its multi-pass variants.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: EMA[0] = x[0]. Every index carries a value, so the lookback is 0.
//!
//! This raw-seeded contract is shared by every EMA consumer in the crate
//! (MACD, KVO, Elder power, Force Index, DEMA, TEMA).

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{chained_span, rejected, require_len, require_period, IndicatorError};

/// EMA of an arbitrary series. `period == 0` or an empty series yields an
/// empty result.
pub fn ema(series: &[f64], period: usize) -> Vec<f64> {
    let checked = require_period("period", period, 1).and_then(|_| {
        if series.is_empty() {
            Err(IndicatorError::EmptyInput)
        } else {
            Ok(())
        }
    });
    if let Err(e) = checked {
        rejected("ema", e);
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(series.len());
    let mut prev = series[0];
    result.push(prev);
    for &x in &series[1..] {
        prev = alpha * x + (1.0 - alpha) * prev;
        result.push(prev);
    }
    result
}

/// Double EMA: 2·EMA(x) − EMA(EMA(x)).
///
/// `period < 2` or fewer than `2·period − 1` values yields an empty result.
pub fn dema(series: &[f64], period: usize) -> Vec<f64> {
    let checked = require_period("period", period, 2)
        .and_then(|_| require_len(series.len(), chained_span(&[period, period], 1)?));
    if let Err(e) = checked {
        rejected("dema", e);
        return Vec::new();
    }

    let e1 = ema(series, period);
    let e2 = ema(&e1, period);
    e1.iter().zip(&e2).map(|(a, b)| 2.0 * a - b).collect()
}

/// Triple EMA: 3·E1 − 3·E2 + E3.
///
/// `period < 2` or fewer than `3·period − 2` values yields an empty result.
pub fn tema(series: &[f64], period: usize) -> Vec<f64> {
    let checked = require_period("period", period, 2)
        .and_then(|_| require_len(series.len(), chained_span(&[period, period, period], 2)?));
    if let Err(e) = checked {
        rejected("tema", e);
        return Vec::new();
    }

    let e1 = ema(series, period);
    let e2 = ema(&e1, period);
    let e3 = ema(&e2, period);
    e1.iter()
        .zip(&e2)
        .zip(&e3)
        .map(|((a, b), c)| 3.0 * a - 3.0 * b + c)
        .collect()
}

/// Which EMA pass count an [`Ema`] instance computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmaKind {
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    kind: EmaKind,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            kind: EmaKind::Single,
            name: format!("ema_{period}"),
        }
    }

    pub fn double(period: usize) -> Self {
        Self {
            period,
            kind: EmaKind::Double,
            name: format!("dema_{period}"),
        }
    }

    pub fn triple(period: usize) -> Self {
        Self {
            period,
            kind: EmaKind::Triple,
            name: format!("tema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.kind {
            EmaKind::Single => ema(&bars.close, self.period),
            EmaKind::Double => dema(&bars.close, self.period),
            EmaKind::Triple => tema(&bars.close, self.period),
        };
        IndicatorOutput::single(values)
    }
}
