//! Average Directional Index (ADX), Wilder.
//!
//! 1. +DM / -DM and True Range from consecutive bars (bar 1 onward)
//! 2. Wilder-smooth all three over `period`; first smoothed value at bar `period`
//! 3. +DI = 100 · +DM / TR, -DI = 100 · -DM / TR (0 when TR is 0)
//! 4. DX = 100 · |+DI - -DI| / (+DI + -DI) (0 when both are 0)
//! 5. ADX = Wilder-smoothed DX; first value at bar `2·period - 1`
//!
//! Lookback: 2·period - 1, zero-filled. `period < 2`, mismatched or empty
//! input, and fewer than `2·period` bars all yield an empty result.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, chained_span, rejected, require_len, require_period, IndicatorError};
use crate::indicators::atr::{true_range, wilder_smooth};

pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let checked = aligned_len(&[close, high, low]).and_then(|n| {
        if n == 0 {
            return Err(IndicatorError::EmptyInput);
        }
        require_period("period", period, 2)?;
        require_len(n, chained_span(&[period, period], 0)?)
    });
    if let Err(e) = checked {
        rejected("adx", e);
        return Vec::new();
    }

    let n = close.len();
    let mut plus_dm = Vec::with_capacity(n - 1);
    let mut minus_dm = Vec::with_capacity(n - 1);
    for i in 1..n {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let tr = true_range(high, low, close);
    let smooth_tr = wilder_smooth(&tr[1..], period);
    let smooth_plus = wilder_smooth(&plus_dm, period);
    let smooth_minus = wilder_smooth(&minus_dm, period);

    // dx[k] belongs to bar period + k
    let dx: Vec<f64> = (period - 1..n - 1)
        .map(|j| {
            if smooth_tr[j] == 0.0 {
                return 0.0;
            }
            let plus_di = 100.0 * smooth_plus[j] / smooth_tr[j];
            let minus_di = 100.0 * smooth_minus[j] / smooth_tr[j];
            let di_sum = plus_di + minus_di;
            if di_sum == 0.0 {
                0.0
            } else {
                100.0 * (plus_di - minus_di).abs() / di_sum
            }
        })
        .collect();

    let mut result = vec![0.0; n];
    let smoothed = wilder_smooth(&dx, period);
    for (k, v) in smoothed.into_iter().enumerate().skip(period - 1) {
        result[period + k] = v;
    }
    result
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("adx_{period}"),
        }
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_mul(2).saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(adx(&bars.high, &bars.low, &bars.close, self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn adx_one_sided_trend_reads_100() {
        let high = [10.0, 11.0, 12.0, 13.0, 14.0];
        let low = [9.0, 9.5, 10.0, 10.5, 11.0];
        let close = [9.5, 10.0, 11.0, 12.0, 13.5];
        let result = adx(&high, &low, &close, 2);
        assert_eq!(&result[..3], &[0.0, 0.0, 0.0]);
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
        assert_approx(result[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn adx_flat_bars_are_zero() {
        let price = vec![10.0; 14];
        let result = adx(&price, &price, &price, 7);
        assert_eq!(result, vec![0.0; 14]);
    }

    #[test]
    fn adx_bounded() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.45).sin() * 8.0 + i as f64 * 0.1)
            .collect();
        let bars = make_bars(&closes);
        for v in adx(&bars.high, &bars.low, &bars.close, 14) {
            assert!((0.0..=100.0).contains(&v), "ADX out of range: {v}");
        }
    }

    #[test]
    fn adx_rejections() {
        let x: Vec<f64> = (0..30).map(|i| 10.0 + i as f64).collect();
        assert!(adx(&[], &[], &[], 14).is_empty());
        assert!(adx(&x, &x, &x[..10], 14).is_empty());
        assert!(adx(&x, &x, &x, 1).is_empty());
        assert!(adx(&x[..27], &x[..27], &x[..27], 14).is_empty());
        assert_eq!(adx(&x[..28], &x[..28], &x[..28], 14).len(), 28);
    }

    #[test]
    fn adx_lookback() {
        assert_eq!(Adx::new(14).lookback(), 27);
        assert_eq!(Adx::new(usize::MAX).lookback(), usize::MAX - 1);
    }
}
