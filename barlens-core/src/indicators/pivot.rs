//! Classic floor-trader pivot points, computed per bar.
//!
//! pivot = (H + L + C) / 3, S1 = 2P - H, R1 = 2P - L, S2 = P - (H - L),
//! R2 = P + (H - L). No lookback. Mismatched lengths → empty levels.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotLevels {
    pub pivot: Vec<f64>,
    pub s1: Vec<f64>,
    pub r1: Vec<f64>,
    pub s2: Vec<f64>,
    pub r2: Vec<f64>,
}

pub fn pivot_points(high: &[f64], low: &[f64], close: &[f64]) -> PivotLevels {
    let n = match aligned_len(&[high, low, close]) {
        Ok(n) => n,
        Err(e) => {
            rejected("pivot_points", e);
            return PivotLevels::default();
        }
    };

    let mut levels = PivotLevels {
        pivot: Vec::with_capacity(n),
        s1: Vec::with_capacity(n),
        r1: Vec::with_capacity(n),
        s2: Vec::with_capacity(n),
        r2: Vec::with_capacity(n),
    };
    for i in 0..n {
        let p = (high[i] + low[i] + close[i]) / 3.0;
        let range = high[i] - low[i];
        levels.pivot.push(p);
        levels.s1.push(2.0 * p - high[i]);
        levels.r1.push(2.0 * p - low[i]);
        levels.s2.push(p - range);
        levels.r2.push(p + range);
    }
    levels
}

#[derive(Debug, Clone, Default)]
pub struct Pivot;

impl Indicator for Pivot {
    fn name(&self) -> &str {
        "pivot"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let levels = pivot_points(&bars.high, &bars.low, &bars.close);
        IndicatorOutput::new()
            .with("pivot", levels.pivot)
            .with("s1", levels.s1)
            .with("r1", levels.r1)
            .with("s2", levels.s2)
            .with("r2", levels.r2)
    }
}
