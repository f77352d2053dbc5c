//! Rolling Z-Score: (x - SMA(window)) / RollingStd(window).
//!
//! NaN where the standard deviation is still NaN (lookback `window - 1`),
//! 0 where it is exactly 0.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{rejected, require_period};
use crate::indicators::window::{rolling_mean, rolling_std};

pub fn zscore(series: &[f64], window: usize) -> Vec<f64> {
    if let Err(e) = require_period("window", window, 1) {
        rejected("zscore", e);
        return Vec::new();
    }

    let mean = rolling_mean(series, window);
    let std = rolling_std(series, window);
    series
        .iter()
        .zip(mean.iter().zip(&std))
        .map(|(&x, (&m, &s))| if s == 0.0 { 0.0 } else { (x - m) / s })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ZScore {
    window: usize,
    name: String,
}

impl ZScore {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            name: format!("zscore_{window}"),
        }
    }
}

impl Indicator for ZScore {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        IndicatorOutput::single(zscore(&bars.close, self.window))
    }
}
