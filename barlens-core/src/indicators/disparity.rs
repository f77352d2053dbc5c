//! Disparity index: percent distance of close from its SMA.
//!
//! disp[i] = (close[i] - SMA[i]) / SMA[i] · 100 over `period` (default 14).
//! Lookback: period - 1, zero-filled; 0 wherever the SMA is 0.
//! `period == 0` → empty; a series shorter than the period → all zeros.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::indicators::sma::sma;

pub const DISPARITY_PERIOD: usize = 14;

pub fn disparity(close: &[f64], period: usize) -> Vec<f64> {
    let average = sma(close, period);
    close
        .iter()
        .zip(&average)
        .map(|(&c, &m)| if m == 0.0 { 0.0 } else { (c - m) / m * 100.0 })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Disparity {
    period: usize,
    name: String,
}

impl Disparity {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("disp_{period}"),
        }
    }
}

impl Default for Disparity {
    fn default() -> Self {
        Self::new(DISPARITY_PERIOD)
    }
}

impl Indicator for Disparity {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(disparity(&bars.close, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn disparity_known_values() {
        let result = disparity(&[10.0, 10.0, 13.0, 8.0], 3);
        assert_eq!(&result[..2], &[0.0, 0.0]);
        assert_approx(result[2], 18.181818181818183, 1e-9);
        assert_approx(result[3], (8.0 - 31.0 / 3.0) / (31.0 / 3.0) * 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn disparity_constant_series_is_zero() {
        let result = disparity(&[25.0; 20], DISPARITY_PERIOD);
        assert!(result.iter().all(|&v| v.abs() < 1e-12));
    }

    #[test]
    fn disparity_degenerate_inputs() {
        assert!(disparity(&[1.0, 2.0], 0).is_empty());
        assert_eq!(disparity(&[1.0, 2.0], 14), vec![0.0, 0.0]);
        assert_eq!(Disparity::default().name(), "disp_14");
    }
}
