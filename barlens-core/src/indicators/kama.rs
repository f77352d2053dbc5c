//! Kaufman Adaptive Moving Average (KAMA).
//!
//! Efficiency ratio ER = |x[i] - x[i-period]| / Σ|x[j] - x[j-1]| over the
//! trailing `period` changes (0 when the path length is 0). The smoothing
//! constant sc = (ER · (fast_sc - slow_sc) + slow_sc)², with fast/slow spans
//! 2 and 30, drives KAMA[i] = KAMA[i-1] + sc · (x[i] - KAMA[i-1]).
//!
//! The recurrence seeds on x[period-1]; the first output sits at index
//! `period`. Lookback: period, zero-filled. `period < 2` or `len <= period`
//! yields an empty series.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{chained_span, rejected, require_len, require_period};

const FAST_SPAN: f64 = 2.0;
const SLOW_SPAN: f64 = 30.0;

pub fn kama(series: &[f64], period: usize) -> Vec<f64> {
    let checked = require_period("period", period, 2)
        .and_then(|_| require_len(series.len(), chained_span(&[period, 1], 0)?));
    if let Err(e) = checked {
        rejected("kama", e);
        return Vec::new();
    }

    let fast_sc = 2.0 / (FAST_SPAN + 1.0);
    let slow_sc = 2.0 / (SLOW_SPAN + 1.0);

    let n = series.len();
    let mut result = vec![0.0; n];
    // Path length over changes (i-period, i]; primed with changes 1..period.
    let mut path: f64 = (1..period).map(|j| (series[j] - series[j - 1]).abs()).sum();
    let mut prev = series[period - 1];

    for i in period..n {
        path += (series[i] - series[i - 1]).abs();
        if i > period {
            path -= (series[i - period] - series[i - period - 1]).abs();
        }
        let change = (series[i] - series[i - period]).abs();
        let er = if path > 0.0 { change / path } else { 0.0 };
        let sc = (er * (fast_sc - slow_sc) + slow_sc).powi(2);
        prev += sc * (series[i] - prev);
        result[i] = prev;
    }
    result
}

#[derive(Debug, Clone)]
pub struct Kama {
    period: usize,
    name: String,
}

impl Kama {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("kama_{period}"),
        }
    }
}

impl Indicator for Kama {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(kama(&bars.close, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn kama_straight_line_uses_fast_constant() {
        // ER = 1 on a straight line → sc = (2/3)²
        let data: Vec<f64> = (0..6).map(f64::from).collect();
        let result = kama(&data, 3);
        assert_eq!(&result[..3], &[0.0, 0.0, 0.0]);
        let sc = (2.0_f64 / 3.0).powi(2);
        let k3 = 2.0 + sc * (3.0 - 2.0);
        assert_approx(result[3], k3, DEFAULT_EPSILON);
        let k4 = k3 + sc * (4.0 - k3);
        assert_approx(result[4], k4, DEFAULT_EPSILON);
    }

    #[test]
    fn kama_choppy_series_uses_slow_constant() {
        // Net change 0 over the window → ER 0 → sc = (2/31)²
        let data = [10.0, 12.0, 10.0, 12.0, 10.0];
        let result = kama(&data, 2);
        let sc = (2.0_f64 / 31.0).powi(2);
        let k2 = 12.0 + sc * (10.0 - 12.0);
        assert_approx(result[2], k2, DEFAULT_EPSILON);
        let k3 = k2 + sc * (12.0 - k2);
        assert_approx(result[3], k3, DEFAULT_EPSILON);
    }

    #[test]
    fn kama_flat_series_stays_flat() {
        let result = kama(&[5.0; 8], 3);
        for v in &result[3..] {
            assert_eq!(*v, 5.0);
        }
    }

    #[test]
    fn kama_rejections() {
        assert!(kama(&[1.0, 2.0, 3.0], 1).is_empty());
        assert!(kama(&[1.0, 2.0, 3.0], 3).is_empty());
        assert_eq!(kama(&[1.0, 2.0, 3.0, 4.0], 3).len(), 4);
    }
}
