//! Ichimoku Cloud.
//!
//! Five same-length series from one high/low/close input:
//! - Tenkan-sen: midpoint of the `tenkan` window (highest high + lowest low) / 2
//! - Kijun-sen: midpoint of the `kijun` window
//! - Senkou Span A: (Tenkan + Kijun) / 2, written `displacement` bars ahead
//! - Senkou Span B: midpoint of the `senkou_b` window, written `displacement` bars ahead
//! - Chikou Span: close written `displacement` bars back
//!
//! Both leading spans are projected only from bars where every window is
//! complete (index >= longest period - 1). Projections that would land past
//! the end are dropped, so slots without a source stay NaN. With the default
//! periods and exactly 52 bars the leading spans are NaN everywhere.
//!
//! Mismatched input or fewer bars than the longest period → all five empty.
//! The Chikou span reads future closes and is not causal.

use serde::{Deserialize, Serialize};

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_len, require_period};
use crate::indicators::window::{rolling_max, rolling_min};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
            displacement: 26,
        }
    }
}

impl IchimokuParams {
    fn longest(&self) -> usize {
        self.tenkan.max(self.kijun).max(self.senkou_b)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IchimokuResult {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub span_a: Vec<f64>,
    pub span_b: Vec<f64>,
    pub chikou: Vec<f64>,
}

impl IchimokuResult {
    pub fn is_empty(&self) -> bool {
        self.tenkan.is_empty()
    }
}

/// Ichimoku with the standard 9/26/52 periods and 26-bar displacement.
pub fn ichimoku(high: &[f64], low: &[f64], close: &[f64]) -> IchimokuResult {
    ichimoku_with(high, low, close, IchimokuParams::default())
}

pub fn ichimoku_with(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    params: IchimokuParams,
) -> IchimokuResult {
    let checked = aligned_len(&[high, low, close]).and_then(|n| {
        require_period("tenkan", params.tenkan, 1)?;
        require_period("kijun", params.kijun, 1)?;
        require_period("senkou_b", params.senkou_b, 1)?;
        require_len(n, params.longest())
    });
    if let Err(e) = checked {
        rejected("ichimoku", e);
        return IchimokuResult::default();
    }

    let n = close.len();
    let tenkan = midpoint(high, low, params.tenkan);
    let kijun = midpoint(high, low, params.kijun);
    let cloud_base = midpoint(high, low, params.senkou_b);

    let mut span_a = vec![f64::NAN; n];
    let mut span_b = vec![f64::NAN; n];
    let shift = params.displacement;
    for i in (params.longest() - 1)..n.saturating_sub(shift) {
        span_a[i + shift] = (tenkan[i] + kijun[i]) / 2.0;
        span_b[i + shift] = cloud_base[i];
    }

    let mut chikou = vec![f64::NAN; n];
    for i in shift..n {
        chikou[i - shift] = close[i];
    }

    IchimokuResult {
        tenkan,
        kijun,
        span_a,
        span_b,
        chikou,
    }
}

/// (highest high + lowest low) / 2 over a trailing window, NaN before it fills.
fn midpoint(high: &[f64], low: &[f64], window: usize) -> Vec<f64> {
    rolling_max(high, window)
        .into_iter()
        .zip(rolling_min(low, window))
        .map(|(h, l)| (h + l) / 2.0)
        .collect()
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    params: IchimokuParams,
    name: String,
}

impl Ichimoku {
    pub fn new(params: IchimokuParams) -> Self {
        Self {
            name: format!(
                "ichimoku_{}_{}_{}",
                params.tenkan, params.kijun, params.senkou_b
            ),
            params,
        }
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(IchimokuParams::default())
    }
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    /// First bar with a leading-span value.
    fn lookback(&self) -> usize {
        self.params
            .longest()
            .saturating_sub(1)
            .saturating_add(self.params.displacement)
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let result = ichimoku_with(&bars.high, &bars.low, &bars.close, self.params);
        IndicatorOutput::new()
            .with("tenkan", result.tenkan)
            .with("kijun", result.kijun)
            .with("span_a", result.span_a)
            .with("span_b", result.span_b)
            .with("chikou", result.chikou)
    }
}
