//! Indicator trait and computed-series containers.
//!
//! Indicators are pure functions: bar columns in, named numeric series out.
//! Each output series has the length of the input, or is empty when the
//! indicator rejected its input.

use crate::domain::BarSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Component name used by single-series indicators.
pub const VALUE: &str = "value";

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later,
/// with the single documented exception of Ichimoku's Chikou span, which is a
/// backward shift by definition.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "macd_12_26_9").
    fn name(&self) -> &str;

    /// Number of leading bars that hold the warm-up fill value.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the whole bar set.
    fn compute(&self, bars: &BarSet) -> IndicatorOutput;
}

/// Named component series produced by one indicator.
///
/// Multi-series indicators (Bollinger, MACD, Supertrend, Ichimoku) store each
/// band under its own component name; single-series indicators use [`VALUE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorOutput {
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output holding one unnamed series.
    pub fn single(values: Vec<f64>) -> Self {
        let mut out = Self::new();
        out.insert(VALUE, values);
        out
    }

    /// Builder-style insert of a named component.
    pub fn with(mut self, component: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(component, values);
        self
    }

    pub fn insert(&mut self, component: impl Into<String>, values: Vec<f64>) {
        self.series.insert(component.into(), values);
    }

    pub fn get(&self, component: &str) -> Option<&[f64]> {
        self.series.get(component).map(|v| v.as_slice())
    }

    /// The [`VALUE`] series of a single-series indicator.
    pub fn value(&self) -> Option<&[f64]> {
        self.get(VALUE)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// True when there are no components or every component is empty.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(|v| v.is_empty())
    }
}

/// Container for precomputed indicator values, keyed by series name.
///
/// Single-series indicators are stored under the indicator name; components
/// of multi-series indicators under `"{indicator}.{component}"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Flatten an indicator's output into this container.
    pub fn insert_output(&mut self, indicator: &str, output: IndicatorOutput) {
        for (component, values) in output.series {
            if component == VALUE {
                self.insert(indicator, values);
            } else {
                self.insert(format!("{indicator}.{component}"), values);
            }
        }
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
