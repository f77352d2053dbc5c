//! Chaikin Money Flow (CMF).
//!
//! Money-flow multiplier = ((close - low) - (high - close)) / (high - low),
//! 0 when high == low. CMF = Σ(multiplier · volume) / Σ volume over `period`.
//! Lookback: period - 1, zero-filled. Zero volume sum → 0.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_len, require_period};
use crate::indicators::window::rolling_sum;

pub fn cmf(high: &[f64], low: &[f64], close: &[f64], volume: &[f64], period: usize) -> Vec<f64> {
    let checked = aligned_len(&[high, low, close, volume]).and_then(|n| {
        require_period("period", period, 1)?;
        require_len(n, period)
    });
    if let Err(e) = checked {
        rejected("cmf", e);
        return Vec::new();
    }

    let flow_volume: Vec<f64> = (0..close.len())
        .map(|i| {
            let range = high[i] - low[i];
            if range == 0.0 {
                0.0
            } else {
                (2.0 * close[i] - high[i] - low[i]) / range * volume[i]
            }
        })
        .collect();

    let flow_sum = rolling_sum(&flow_volume, period);
    let volume_sum = rolling_sum(volume, period);
    flow_sum
        .iter()
        .zip(&volume_sum)
        .map(|(&f, &v)| if v == 0.0 { 0.0 } else { f / v })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Cmf {
    period: usize,
    name: String,
}

impl Cmf {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("cmf_{period}"),
        }
    }
}

impl Indicator for Cmf {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(cmf(
            &bars.high,
            &bars.low,
            &bars.close,
            &bars.volume,
            self.period,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn cmf_known_values() {
        let high = [10.0, 10.0, 10.0];
        let low = [0.0, 0.0, 0.0];
        // multipliers: 1, 0, -0.6
        let close = [10.0, 5.0, 2.0];
        let volume = [100.0, 200.0, 100.0];
        let result = cmf(&high, &low, &close, &volume, 2);

        assert_eq!(result[0], 0.0);
        assert_approx(result[1], 100.0 / 300.0, DEFAULT_EPSILON);
        assert_approx(result[2], -60.0 / 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn cmf_high_equals_low_is_zero() {
        let price = vec![50.0; 5];
        let volume = vec![1000.0; 5];
        let result = cmf(&price, &price, &price, &volume, 3);
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn cmf_zero_volume_is_zero() {
        let result = cmf(&[2.0, 3.0], &[1.0, 1.0], &[2.0, 3.0], &[0.0, 0.0], 2);
        assert_eq!(result, vec![0.0, 0.0]);
    }

    #[test]
    fn cmf_bounded() {
        let high = [12.0, 14.0, 13.0, 15.0, 16.0, 14.5];
        let low = [10.0, 11.0, 11.5, 12.0, 13.0, 12.0];
        let close = [11.0, 13.9, 11.6, 14.0, 13.1, 14.4];
        let volume = [500.0, 800.0, 300.0, 900.0, 400.0, 700.0];
        for v in cmf(&high, &low, &close, &volume, 3) {
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn cmf_rejections() {
        let x = [1.0, 2.0];
        assert!(cmf(&x, &x, &x, &x[..1], 1).is_empty());
        assert!(cmf(&x, &x, &x, &x, 3).is_empty());
        assert!(cmf(&x, &x, &x, &x, 0).is_empty());
    }
}
