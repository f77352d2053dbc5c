//! Stochastic oscillator %K / %D.
//!
//! %K[i] = 100 · (close[i] - lowest_low) / (highest_high - lowest_low) over the
//! trailing `window`; 0 when the range is 0. %D = SMA(%K, smooth_window),
//! taken only over valid %K values.
//!
//! %K lookback: window - 1. %D lookback: window + smooth_window - 2.
//! Lookback entries are NaN, or the neutral 50 when `fill_na` is set.
//! Needs at least window + smooth_window - 1 bars; shorter, mismatched or
//! zero-window input yields empty series.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, chained_span, rejected, require_len, require_period};
use crate::indicators::window::{rolling_max, rolling_min, rolling_sum};

/// Neutral fill for bounded oscillators configured to fill their warm-up.
pub const NEUTRAL_FILL: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StochasticResult {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

impl StochasticResult {
    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}

pub fn stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    window: usize,
    smooth_window: usize,
    fill_na: bool,
) -> StochasticResult {
    let checked = aligned_len(&[high, low, close]).and_then(|n| {
        require_period("window", window, 1)?;
        require_period("smooth_window", smooth_window, 1)?;
        require_len(n, chained_span(&[window, smooth_window], 1)?)
    });
    if let Err(e) = checked {
        rejected("stochastic", e);
        return StochasticResult::default();
    }

    let n = close.len();
    let fill = if fill_na { NEUTRAL_FILL } else { f64::NAN };
    let highest = rolling_max(high, window);
    let lowest = rolling_min(low, window);

    let mut k = vec![fill; n];
    for i in (window - 1)..n {
        let range = highest[i] - lowest[i];
        k[i] = if range == 0.0 {
            0.0
        } else {
            100.0 * (close[i] - lowest[i]) / range
        };
    }

    let k_start = window - 1;
    let sums = rolling_sum(&k[k_start..], smooth_window);
    let mut d = vec![fill; n];
    for (offset, sum) in sums.iter().enumerate().skip(smooth_window - 1) {
        d[k_start + offset] = sum / smooth_window as f64;
    }

    StochasticResult { k, d }
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    window: usize,
    smooth_window: usize,
    fill_na: bool,
    name: String,
}

impl Stochastic {
    pub fn new(window: usize, smooth_window: usize, fill_na: bool) -> Self {
        Self {
            window,
            smooth_window,
            fill_na,
            name: format!("stoch_{window}_{smooth_window}"),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    /// Lookback of %D, the later of the two series.
    fn lookback(&self) -> usize {
        self.window.saturating_add(self.smooth_window).saturating_sub(2)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let result = stochastic(
            &bars.high,
            &bars.low,
            &bars.close,
            self.window,
            self.smooth_window,
            self.fill_na,
        );
        IndicatorOutput::new().with("k", result.k).with("d", result.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn series() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            (10..21).map(f64::from).collect(),
            (1..12).map(f64::from).collect(),
            (0..11).map(|i| 5.0 + 0.5 * i as f64).collect(),
        )
    }

    #[test]
    fn stochastic_known_values() {
        let (h, l, c) = series();
        let result = stochastic(&h, &l, &c, 5, 3, false);
        assert_eq!(result.k.len(), 11);
        for i in 0..4 {
            assert!(result.k[i].is_nan());
        }
        // i=4: highest 14, lowest 1, close 7 → 600/13
        assert_approx(result.k[4], 600.0 / 13.0, DEFAULT_EPSILON);
        // i=5: highest 15, lowest 2, close 7.5 → 550/13
        assert_approx(result.k[5], 550.0 / 13.0, DEFAULT_EPSILON);
        for i in 0..6 {
            assert!(result.d[i].is_nan());
        }
        let expected_d = (result.k[4] + result.k[5] + result.k[6]) / 3.0;
        assert_approx(result.d[6], expected_d, 1e-9);
    }

    #[test]
    fn stochastic_fill_na_uses_neutral_value() {
        let (h, l, c) = series();
        let result = stochastic(&h, &l, &c, 5, 3, true);
        assert_eq!(&result.k[..4], &[50.0; 4]);
        assert_eq!(&result.d[..6], &[50.0; 6]);
    }

    #[test]
    fn stochastic_zero_range_is_zero() {
        let flat = vec![10.0; 7];
        let result = stochastic(&flat, &flat, &flat, 5, 3, false);
        assert_eq!(result.k[4], 0.0);
        assert_eq!(result.d[6], 0.0);
    }

    #[test]
    fn stochastic_rejections() {
        let (h, l, c) = series();
        assert!(stochastic(&[], &[], &[], 5, 3, false).is_empty());
        assert!(stochastic(&h, &l, &c, 0, 3, false).is_empty());
        assert!(stochastic(&h, &l, &c, 5, 0, false).is_empty());
        assert!(stochastic(&h[..6], &l[..6], &c[..6], 5, 3, false).is_empty());
        assert!(stochastic(&h, &l, &c[..3], 3, 2, false).is_empty());
        assert_eq!(stochastic(&h[..7], &l[..7], &c[..7], 5, 3, false).d.len(), 7);
    }

    #[test]
    fn stochastic_window_one() {
        let result = stochastic(&[10.0, 11.0], &[1.0, 2.0], &[5.0, 6.0], 1, 1, false);
        assert_approx(result.k[0], 400.0 / 9.0, DEFAULT_EPSILON);
        assert_approx(result.d[1], result.k[1], DEFAULT_EPSILON);
    }

    #[test]
    fn stochastic_lookback() {
        assert_eq!(Stochastic::new(14, 3, false).lookback(), 15);
    }
}
