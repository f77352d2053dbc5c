//! Simple Moving Average (SMA).
//!
//! Rolling mean of a series over a trailing window, maintained incrementally.
//! Lookback: period - 1, zero-filled (first valid value at index period-1).
//! `period == 0` is invalid and yields an empty series; a series shorter than
//! the period yields all zeros.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{rejected, require_period};
use crate::indicators::window::rolling_mean;

/// SMA of an arbitrary series.
pub fn sma(series: &[f64], period: usize) -> Vec<f64> {
    if let Err(e) = require_period("period", period, 1) {
        rejected("sma", e);
        return Vec::new();
    }
    rolling_mean(series, period)
}

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(sma(&bars.close, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn sma_zero_fill_then_means() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(result, vec![0.0, 0.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_5_basic() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = Sma::new(5).compute(&bars);
        let values = result.value().unwrap();

        assert_eq!(values.len(), 7);
        for v in &values[..4] {
            assert_eq!(*v, 0.0);
        }
        assert_approx(values[4], 12.0, DEFAULT_EPSILON);
        assert_approx(values[5], 13.0, DEFAULT_EPSILON);
        assert_approx(values[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        assert_eq!(sma(&[100.0, 200.0, 300.0], 1), vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sma_period_zero_is_empty() {
        assert!(sma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn sma_too_few_values_is_all_zero() {
        assert_eq!(sma(&[10.0, 11.0], 5), vec![0.0, 0.0]);
    }

    #[test]
    fn sma_constant_series() {
        let result = sma(&[7.5; 30], 10);
        for v in &result[9..] {
            assert_approx(*v, 7.5, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn sma_nan_only_affects_windows_holding_it() {
        let result = sma(&[1.0, f64::NAN, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
        assert_approx(result[7], 7.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(20).lookback(), 19);
        assert_eq!(Sma::new(1).lookback(), 0);
    }
}
