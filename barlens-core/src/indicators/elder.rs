//! Elder power readings and the Force Index, all over raw-seeded EMAs.
//!
//! - Bull power: EMA(close, 13) - EMA(close, 26)
//! - Bear power: close - EMA(close, 13)
//!
//! Both are 0 for the first 12 bars.
//!
//! Force Index: EMA(length) of (close[i] - close[i-1]) · volume[i] taken from
//! bar 1 on, realigned so bar 0 reads 0. A zero length falls back to 13.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected};
use crate::indicators::ema::ema;

const POWER_FAST: usize = 13;
const POWER_SLOW: usize = 26;
const POWER_WARMUP: usize = POWER_FAST - 1;
pub const DEFAULT_FORCE_LENGTH: usize = 13;

pub fn elder_bull(close: &[f64]) -> Vec<f64> {
    let fast = ema(close, POWER_FAST);
    let slow = ema(close, POWER_SLOW);
    fast.iter()
        .zip(&slow)
        .enumerate()
        .map(|(i, (f, s))| if i < POWER_WARMUP { 0.0 } else { f - s })
        .collect()
}

pub fn elder_bear(close: &[f64]) -> Vec<f64> {
    let fast = ema(close, POWER_FAST);
    close
        .iter()
        .zip(&fast)
        .enumerate()
        .map(|(i, (c, f))| if i < POWER_WARMUP { 0.0 } else { c - f })
        .collect()
}

pub fn force_index(close: &[f64], volume: &[f64], length: usize) -> Vec<f64> {
    if let Err(e) = aligned_len(&[close, volume]) {
        rejected("force_index", e);
        return Vec::new();
    }
    if close.is_empty() {
        return Vec::new();
    }

    let length = if length == 0 {
        DEFAULT_FORCE_LENGTH
    } else {
        length
    };
    let push: Vec<f64> = close
        .windows(2)
        .zip(&volume[1..])
        .map(|(pair, v)| (pair[1] - pair[0]) * v)
        .collect();

    let mut result = Vec::with_capacity(close.len());
    result.push(0.0);
    result.extend(ema(&push, length));
    result
}

/// Which Elder reading an [`ElderPower`] instance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElderSide {
    Bull,
    Bear,
}

#[derive(Debug, Clone)]
pub struct ElderPower {
    side: ElderSide,
}

impl ElderPower {
    pub fn bull() -> Self {
        Self {
            side: ElderSide::Bull,
        }
    }

    pub fn bear() -> Self {
        Self {
            side: ElderSide::Bear,
        }
    }
}

impl Indicator for ElderPower {
    fn name(&self) -> &str {
        match self.side {
            ElderSide::Bull => "elder_bull",
            ElderSide::Bear => "elder_bear",
        }
    }

    fn lookback(&self) -> usize {
        POWER_WARMUP
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.side {
            ElderSide::Bull => elder_bull(&bars.close),
            ElderSide::Bear => elder_bear(&bars.close),
        };
        IndicatorOutput::single(values)
    }
}

#[derive(Debug, Clone)]
pub struct ForceIndex {
    length: usize,
    name: String,
}

impl ForceIndex {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            name: format!("force_{length}"),
        }
    }
}

impl Indicator for ForceIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(force_index(&bars.close, &bars.volume, self.length))
    }
}
