//! Donchian channels: trailing lowest low, highest high and their midpoint.
//!
//! Each band is NaN until its own window fills; the midpoint is NaN until
//! both do. NaN bars inside a window are skipped. A zero window length falls
//! back to 20. Empty or mismatched input → `None`.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, IndicatorError};
use crate::indicators::window::{rolling_max, rolling_min};

pub const DEFAULT_LENGTH: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonchianChannels {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub mid: Vec<f64>,
}

pub fn donchian(
    high: &[f64],
    low: &[f64],
    lower_len: usize,
    upper_len: usize,
) -> Option<DonchianChannels> {
    let checked = aligned_len(&[high, low]).and_then(|n| {
        if n == 0 {
            Err(IndicatorError::EmptyInput)
        } else {
            Ok(())
        }
    });
    if let Err(e) = checked {
        rejected("donchian", e);
        return None;
    }

    let lower_len = or_default(lower_len);
    let upper_len = or_default(upper_len);
    let lower = rolling_min(low, lower_len);
    let upper = rolling_max(high, upper_len);
    // NaN on either side propagates
    let mid = lower.iter().zip(&upper).map(|(l, u)| 0.5 * (l + u)).collect();

    Some(DonchianChannels { lower, upper, mid })
}

fn or_default(len: usize) -> usize {
    if len == 0 {
        DEFAULT_LENGTH
    } else {
        len
    }
}

#[derive(Debug, Clone)]
pub struct Donchian {
    lower_len: usize,
    upper_len: usize,
    name: String,
}

impl Donchian {
    pub fn new(lower_len: usize, upper_len: usize) -> Self {
        let lower_len = or_default(lower_len);
        let upper_len = or_default(upper_len);
        Self {
            lower_len,
            upper_len,
            name: format!("donchian_{lower_len}_{upper_len}"),
        }
    }
}

impl Indicator for Donchian {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.lower_len.max(self.upper_len) - 1
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        match donchian(&bars.high, &bars.low, self.lower_len, self.upper_len) {
            Some(channels) => IndicatorOutput::new()
                .with("lower", channels.lower)
                .with("upper", channels.upper)
                .with("mid", channels.mid),
            None => IndicatorOutput::new(),
        }
    }
}
