//! Indicator precomputation orchestration.
//!
//! A configured set of indicators is computed once over a bar set. The
//! indicators are independent pure functions, so they are fanned out across
//! rayon's pool and merged into a single `IndicatorValues` container.

use rayon::prelude::*;

use crate::components::indicator::{Indicator, IndicatorOutput, IndicatorValues};
use crate::domain::BarSet;

/// Precompute all indicators over one bar set.
///
/// Every series in the result has the bar count as its length, or is empty
/// when that indicator rejected the input.
pub fn precompute(bars: &BarSet, indicators: &[Box<dyn Indicator>]) -> IndicatorValues {
    if !bars.is_aligned() {
        tracing::warn!(bars = bars.len(), "bar columns have unequal lengths");
    }

    let outputs: Vec<(&str, IndicatorOutput)> = indicators
        .par_iter()
        .map(|indicator| (indicator.name(), indicator.compute(bars)))
        .collect();

    let mut values = IndicatorValues::new();
    let mut rejected = 0usize;
    for (name, output) in outputs {
        if cfg!(debug_assertions) {
            for (component, series) in output.components() {
                debug_assert!(
                    series.is_empty() || series.len() == bars.len(),
                    "indicator '{name}.{component}' produced {} values for {} bars",
                    series.len(),
                    bars.len()
                );
            }
        }
        if output.is_empty() && !bars.is_empty() {
            rejected += 1;
        }
        values.insert_output(name, output);
    }

    tracing::debug!(
        bars = bars.len(),
        indicators = indicators.len(),
        series = values.len(),
        rejected,
        "precomputed indicators"
    );
    values
}

/// Compute the warmup length from a set of indicators.
///
/// The warmup is the maximum lookback across all indicators: the first bar at
/// which every indicator carries a history-supported value.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}
