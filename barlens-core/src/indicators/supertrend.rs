//! Supertrend: ATR bands that ratchet with the prevailing direction.
//!
//! Inherently sequential: each bar's direction is decided against the previous
//! bar's (possibly ratcheted) bands, so the computation is a fold carrying a
//! [`BandState`] from bar to bar.
//!
//! - basic bands: hl2 ± multiplier · ATR(period), Wilder ATR
//! - close above the previous upper band → bullish (+1)
//! - close below the previous lower band → bearish (-1)
//! - otherwise the previous direction holds
//!
//! While the direction is unchanged from the previous bar, the active band is
//! ratcheted: the lower band never falls in an uptrend, the upper band never
//! rises in a downtrend. On a flip the new active band starts from its basic
//! value.
//!
//! Bar 0 is bullish with trend 0 and no long/short value. `long` carries the
//! active band only on bullish bars and `short` only on bearish bars, NaN
//! elsewhere. Mismatched or empty input → `None`. A zero period falls back
//! to 7, a non-positive multiplier to 3.0.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, IndicatorError};
use crate::indicators::atr::atr;

pub const DEFAULT_PERIOD: usize = 7;
pub const DEFAULT_MULTIPLIER: f64 = 3.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupertrendResult {
    pub trend: Vec<f64>,
    pub direction: Vec<i8>,
    pub long: Vec<f64>,
    pub short: Vec<f64>,
}

/// State carried from one bar to the next.
#[derive(Debug, Clone, Copy)]
struct BandState {
    upper: f64,
    lower: f64,
    direction: i8,
}

impl BandState {
    /// Advance one bar given this bar's basic bands and close.
    fn step(self, upper: f64, lower: f64, close: f64) -> Self {
        let direction = if close > self.upper {
            1
        } else if close < self.lower {
            -1
        } else {
            self.direction
        };

        let mut next = Self {
            upper,
            lower,
            direction,
        };
        if direction == self.direction {
            if direction > 0 {
                next.lower = lower.max(self.lower);
            } else {
                next.upper = upper.min(self.upper);
            }
        }
        next
    }

    fn active_band(&self) -> f64 {
        if self.direction > 0 {
            self.lower
        } else {
            self.upper
        }
    }
}

pub fn supertrend(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    multiplier: f64,
) -> Option<SupertrendResult> {
    let checked = aligned_len(&[close, high, low]).and_then(|n| {
        if n == 0 {
            Err(IndicatorError::EmptyInput)
        } else {
            Ok(n)
        }
    });
    let n = match checked {
        Ok(n) => n,
        Err(e) => {
            rejected("supertrend", e);
            return None;
        }
    };

    let period = if period == 0 { DEFAULT_PERIOD } else { period };
    let multiplier = if multiplier > 0.0 {
        multiplier
    } else {
        DEFAULT_MULTIPLIER
    };

    let atr = atr(high, low, close, period);
    let basic = |i: usize| {
        let hl2 = (high[i] + low[i]) / 2.0;
        (hl2 + multiplier * atr[i], hl2 - multiplier * atr[i])
    };

    let mut result = SupertrendResult {
        trend: vec![0.0; n],
        direction: vec![1; n],
        long: vec![f64::NAN; n],
        short: vec![f64::NAN; n],
    };

    let (upper, lower) = basic(0);
    let mut state = BandState {
        upper,
        lower,
        direction: 1,
    };
    for i in 1..n {
        let (upper, lower) = basic(i);
        state = state.step(upper, lower, close[i]);

        let band = state.active_band();
        result.direction[i] = state.direction;
        result.trend[i] = band;
        if state.direction > 0 {
            result.long[i] = band;
        } else {
            result.short[i] = band;
        }
    }

    Some(result)
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period,
            multiplier,
            name: format!("supertrend_{period}_{multiplier}"),
        }
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let period = if self.period == 0 {
            DEFAULT_PERIOD
        } else {
            self.period
        };
        period - 1
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let Some(result) = supertrend(
            &bars.high,
            &bars.low,
            &bars.close,
            self.period,
            self.multiplier,
        ) else {
            return IndicatorOutput::new();
        };
        let direction = result.direction.iter().map(|&d| f64::from(d)).collect();
        IndicatorOutput::new()
            .with("trend", result.trend)
            .with("direction", direction)
            .with("long", result.long)
            .with("short", result.short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn uptrend_then_crash() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64 * 2.0).collect();
        closes.extend((0..10).map(|i| 130.0 - i as f64 * 8.0));
        closes
    }

    #[test]
    fn supertrend_first_bar() {
        let bars = make_bars(&uptrend_then_crash());
        let result = supertrend(&bars.high, &bars.low, &bars.close, 5, 2.0).unwrap();
        assert_eq!(result.direction[0], 1);
        assert_eq!(result.trend[0], 0.0);
        assert!(result.long[0].is_nan());
        assert!(result.short[0].is_nan());
    }

    #[test]
    fn supertrend_flips_on_crash() {
        let bars = make_bars(&uptrend_then_crash());
        let result = supertrend(&bars.high, &bars.low, &bars.close, 5, 2.0).unwrap();
        assert_eq!(result.direction[19], 1);
        assert_eq!(*result.direction.last().unwrap(), -1);
        let last = result.trend.len() - 1;
        assert!(result.long[last].is_nan());
        assert_approx(result.short[last], result.trend[last], DEFAULT_EPSILON);
    }

    #[test]
    fn supertrend_directions_are_unit() {
        let bars = make_bars(&uptrend_then_crash());
        let result = supertrend(&bars.high, &bars.low, &bars.close, 5, 2.0).unwrap();
        assert!(result.direction.iter().all(|&d| d == 1 || d == -1));
    }

    #[test]
    fn supertrend_ratchet_never_retreats() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.9).sin() * 3.0)
            .collect();
        let bars = make_bars(&closes);
        let result = supertrend(&bars.high, &bars.low, &bars.close, 7, 3.0).unwrap();
        for i in 2..closes.len() {
            if result.direction[i] != result.direction[i - 1] {
                continue;
            }
            if result.direction[i] > 0 {
                assert!(result.trend[i] >= result.trend[i - 1], "lower band fell at bar {i}");
            } else {
                assert!(result.trend[i] <= result.trend[i - 1], "upper band rose at bar {i}");
            }
        }
    }

    #[test]
    fn supertrend_hold_keeps_direction_and_band() {
        // Bar 1 closes between the previous bands; its basic lower band is
        // above bar 0's, so it becomes the trend.
        let high = [11.0, 10.6];
        let low = [9.0, 9.4];
        let close = [10.0, 10.0];
        let result = supertrend(&high, &low, &close, 1, 1.0).unwrap();
        // Bar 0: TR 2 → bands 12 / 8. Bar 1: TR 1.2 → basic lower 8.8
        assert_eq!(result.direction[1], 1);
        assert_approx(result.trend[1], 8.8, DEFAULT_EPSILON);

        let high = [11.0, 12.0];
        let low = [9.0, 6.0];
        let close = [10.0, 9.0];
        let result = supertrend(&high, &low, &close, 1, 1.0).unwrap();
        // Bar 1: TR 6 → basic lower 3, ratcheted to 8
        assert_eq!(result.direction[1], 1);
        assert_approx(result.trend[1], 8.0, DEFAULT_EPSILON);
    }

    #[test]
    fn supertrend_reconfirmation_keeps_ratchet() {
        let high = [11.0, 14.0];
        let low = [9.0, 6.0];
        let close = [10.0, 13.0];
        let result = supertrend(&high, &low, &close, 1, 1.0).unwrap();
        assert_eq!(result.direction[1], 1);
        assert_approx(result.trend[1], 8.0, DEFAULT_EPSILON);
        assert_approx(result.long[1], 8.0, DEFAULT_EPSILON);
        assert!(result.short[1].is_nan());
    }

    #[test]
    fn supertrend_defaults_substituted() {
        let bars = make_bars(&uptrend_then_crash());
        let defaulted = supertrend(&bars.high, &bars.low, &bars.close, 0, -1.0).unwrap();
        let explicit = supertrend(&bars.high, &bars.low, &bars.close, 7, 3.0).unwrap();
        assert_eq!(defaulted.direction, explicit.direction);
        assert_eq!(defaulted.trend, explicit.trend);
    }

    #[test]
    fn supertrend_rejects_mismatch_and_empty() {
        assert!(supertrend(&[1.0; 10], &[1.0; 9], &[1.0; 9], 7, 3.0).is_none());
        assert!(supertrend(&[], &[], &[], 7, 3.0).is_none());
    }

    #[test]
    fn supertrend_indicator_outputs() {
        let bars = make_bars(&uptrend_then_crash());
        let out = Supertrend::new(5, 2.0).compute(&bars);
        assert_eq!(out.components().count(), 4);
        assert_eq!(out.get("direction").unwrap()[0], 1.0);
        assert_eq!(Supertrend::new(10, 3.0).lookback(), 9);
    }
}
