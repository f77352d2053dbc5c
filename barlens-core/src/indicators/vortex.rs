//! Vortex Indicator (VI+ / VI-).
//!
//! VM+[i] = |high[i] - low[i-1]|, VM-[i] = |low[i] - high[i-1]|, each summed over
//! the trailing `period` bars and divided by the matching True Range sum.
//! Lookback: period, zero-filled. A zero True Range sum reads 0.
//! Needs `period + 1` bars; shorter or mismatched input yields empty series.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, chained_span, rejected, require_len, require_period};
use crate::indicators::atr::true_range;
use crate::indicators::window::rolling_sum;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VortexResult {
    pub plus: Vec<f64>,
    pub minus: Vec<f64>,
}

impl VortexResult {
    pub fn is_empty(&self) -> bool {
        self.plus.is_empty()
    }
}

pub fn vortex(high: &[f64], low: &[f64], close: &[f64], period: usize) -> VortexResult {
    let checked = aligned_len(&[high, low, close]).and_then(|n| {
        require_period("period", period, 1)?;
        require_len(n, chained_span(&[period, 1], 0)?)
    });
    if let Err(e) = checked {
        rejected("vortex", e);
        return VortexResult::default();
    }

    let n = close.len();
    let mut up = vec![0.0; n];
    let mut down = vec![0.0; n];
    for i in 1..n {
        up[i] = (high[i] - low[i - 1]).abs();
        down[i] = (low[i] - high[i - 1]).abs();
    }

    let sum_up = rolling_sum(&up, period);
    let sum_down = rolling_sum(&down, period);
    let sum_tr = rolling_sum(&true_range(high, low, close), period);

    let mut result = VortexResult {
        plus: vec![0.0; n],
        minus: vec![0.0; n],
    };
    for i in period..n {
        if sum_tr[i] == 0.0 {
            continue;
        }
        result.plus[i] = sum_up[i] / sum_tr[i];
        result.minus[i] = sum_down[i] / sum_tr[i];
    }
    result
}

#[derive(Debug, Clone)]
pub struct Vortex {
    period: usize,
    name: String,
}

impl Vortex {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("vortex_{period}"),
        }
    }
}

impl Indicator for Vortex {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let result = vortex(&bars.high, &bars.low, &bars.close, self.period);
        IndicatorOutput::new()
            .with("plus", result.plus)
            .with("minus", result.minus)
    }
}
