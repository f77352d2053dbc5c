//! Bar-pattern signals. Each bar reads 1.0 when the pattern fires, else 0.0.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected};
use crate::indicators::sma::sma;

/// Bars spanned by the head-and-shoulders shape.
pub const SHOULDERS_SPAN: usize = 4;
pub const BLOCK_VOLUME_WINDOW: usize = 50;
pub const BLOCK_VOLUME_MULTIPLE: f64 = 5.0;

/// Head and shoulders top: the highs four to one bars back go
/// up-down-up (left shoulder, head, right shoulder) and the close has fallen
/// below the close four bars back.
///
/// Zero for the first four bars. Mismatched lengths → empty.
pub fn head_shoulders(close: &[f64], high: &[f64]) -> Vec<f64> {
    let n = match aligned_len(&[close, high]) {
        Ok(n) => n,
        Err(e) => {
            rejected("head_shoulders", e);
            return Vec::new();
        }
    };

    let mut result = vec![0.0; n];
    for i in SHOULDERS_SPAN..n {
        let shape = high[i - 4] < high[i - 3] && high[i - 3] > high[i - 2] && high[i - 2] < high[i - 1];
        if shape && close[i] < close[i - 4] {
            result[i] = 1.0;
        }
    }
    result
}

/// Institutional block sale: volume above five times its 50-bar SMA on a
/// down bar (close below open).
///
/// Zero for the first 50 bars. Mismatched lengths → empty.
pub fn inst_block_trade(open: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
    let n = match aligned_len(&[open, close, volume]) {
        Ok(n) => n,
        Err(e) => {
            rejected("inst_block_trade", e);
            return Vec::new();
        }
    };

    let average = sma(volume, BLOCK_VOLUME_WINDOW);
    let mut result = vec![0.0; n];
    for i in BLOCK_VOLUME_WINDOW..n {
        if volume[i] > average[i] * BLOCK_VOLUME_MULTIPLE && close[i] < open[i] {
            result[i] = 1.0;
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    HeadShoulders,
    InstBlockTrade,
}

#[derive(Debug, Clone)]
pub struct PatternSignal {
    pattern: Pattern,
}

impl PatternSignal {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Indicator for PatternSignal {
    fn name(&self) -> &str {
        match self.pattern {
            Pattern::HeadShoulders => "head_shoulders",
            Pattern::InstBlockTrade => "inst_block_trade",
        }
    }

    fn lookback(&self) -> usize {
        match self.pattern {
            Pattern::HeadShoulders => SHOULDERS_SPAN,
            Pattern::InstBlockTrade => BLOCK_VOLUME_WINDOW,
        }
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.pattern {
            Pattern::HeadShoulders => head_shoulders(&bars.close, &bars.high),
            Pattern::InstBlockTrade => inst_block_trade(&bars.open, &bars.close, &bars.volume),
        };
        IndicatorOutput::single(values)
    }
}
