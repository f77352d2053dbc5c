//! Klinger Volume Oscillator (KVO).
//!
//! Volume force is +volume·100 when the typical price (H+L+C)/3 rose from the
//! previous bar, -volume·100 otherwise (including bar 0 and unchanged bars).
//! KVO = EMA(force, fast) - EMA(force, slow); signal = EMA(KVO, signal).
//! Raw-seeded EMAs, so every bar carries a value and there is no lookback fill.
//! Mismatched lengths yield empty series.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_period};
use crate::indicators::ema::ema;

pub const KVO_FAST: usize = 34;
pub const KVO_SLOW: usize = 55;
pub const KVO_SIGNAL: usize = 13;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KvoResult {
    pub kvo: Vec<f64>,
    pub signal: Vec<f64>,
}

impl KvoResult {
    pub fn is_empty(&self) -> bool {
        self.kvo.is_empty()
    }
}

/// KVO with the standard 34/55/13 spans.
pub fn kvo(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> KvoResult {
    kvo_with_spans(high, low, close, volume, KVO_FAST, KVO_SLOW, KVO_SIGNAL)
}

pub fn kvo_with_spans(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> KvoResult {
    let checked = aligned_len(&[high, low, close, volume]).and_then(|_| {
        require_period("fast", fast, 1)?;
        require_period("slow", slow, 1)?;
        require_period("signal", signal, 1)
    });
    if let Err(e) = checked {
        rejected("kvo", e);
        return KvoResult::default();
    }

    let typical: Vec<f64> = (0..close.len())
        .map(|i| (high[i] + low[i] + close[i]) / 3.0)
        .collect();
    let force: Vec<f64> = (0..close.len())
        .map(|i| {
            let rising = i > 0 && typical[i] - typical[i - 1] > 0.0;
            if rising {
                volume[i] * 100.0
            } else {
                -volume[i] * 100.0
            }
        })
        .collect();

    let fast_ema = ema(&force, fast);
    let slow_ema = ema(&force, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);

    KvoResult {
        kvo: line,
        signal: signal_line,
    }
}

#[derive(Debug, Clone)]
pub struct Kvo {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

impl Kvo {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            signal,
            name: format!("kvo_{fast}_{slow}_{signal}"),
        }
    }
}

impl Default for Kvo {
    fn default() -> Self {
        Self::new(KVO_FAST, KVO_SLOW, KVO_SIGNAL)
    }
}

impl Indicator for Kvo {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let result = kvo_with_spans(
            &bars.high,
            &bars.low,
            &bars.close,
            &bars.volume,
            self.fast,
            self.slow,
            self.signal,
        );
        IndicatorOutput::new()
            .with("kvo", result.kvo)
            .with("signal", result.signal)
    }
}
