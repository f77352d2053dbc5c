//! Moving Average Convergence Divergence (MACD).
//!
//! line = EMA(fast) - EMA(slow), signal = EMA(line, signal), hist = line - signal,
//! all over raw-seeded EMAs. The unstable region [0, slow + signal - 2) is
//! reported as 0 in all three series.
//!
//! Rejections (all → empty series): empty input, any period 0, fast >= slow,
//! fewer than slow + signal - 1 values.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, chained_span, rejected, require_len, require_period, IndicatorError};
use crate::indicators::ema::ema;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdResult {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdResult {
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

/// Number of leading zero-masked bars for the given periods.
pub fn macd_lookback(slow: usize, signal: usize) -> usize {
    slow.saturating_add(signal).saturating_sub(2)
}

pub fn macd(series: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    let checked = validate(series.len(), fast, slow, signal);
    if let Err(e) = checked {
        rejected("macd", e);
        return MacdResult::default();
    }

    let fast_ema = ema(series, fast);
    let slow_ema = ema(series, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let histogram: Vec<f64> = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();

    let mut result = MacdResult {
        line,
        signal: signal_line,
        histogram,
    };
    let unstable = macd_lookback(slow, signal);
    for component in [&mut result.line, &mut result.signal, &mut result.histogram] {
        for v in component.iter_mut().take(unstable) {
            *v = 0.0;
        }
    }
    result
}

/// MACD of the volume-weighted close (close · volume).
pub fn volume_weighted_macd(
    close: &[f64],
    volume: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> MacdResult {
    if let Err(e) = aligned_len(&[close, volume]) {
        rejected("volume_weighted_macd", e);
        return MacdResult::default();
    }
    let weighted: Vec<f64> = close.iter().zip(volume).map(|(c, v)| c * v).collect();
    macd(&weighted, fast, slow, signal)
}

fn validate(n: usize, fast: usize, slow: usize, signal: usize) -> Result<(), IndicatorError> {
    if n == 0 {
        return Err(IndicatorError::EmptyInput);
    }
    require_period("fast", fast, 1)?;
    require_period("slow", slow, 1)?;
    require_period("signal", signal, 1)?;
    if fast >= slow {
        return Err(IndicatorError::InvalidParameter {
            name: "fast",
            value: fast as f64,
        });
    }
    require_len(n, chained_span(&[slow, signal], 1)?)
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    volume_weighted: bool,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            signal,
            volume_weighted: false,
            name: format!("macd_{fast}_{slow}_{signal}"),
        }
    }

    pub fn volume_weighted(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            signal,
            volume_weighted: true,
            name: format!("vwmacd_{fast}_{slow}_{signal}"),
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        macd_lookback(self.slow, self.signal)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let result = if self.volume_weighted {
            volume_weighted_macd(&bars.close, &bars.volume, self.fast, self.slow, self.signal)
        } else {
            macd(&bars.close, self.fast, self.slow, self.signal)
        };
        IndicatorOutput::new()
            .with("line", result.line)
            .with("signal", result.signal)
            .with("histogram", result.histogram)
    }
}
