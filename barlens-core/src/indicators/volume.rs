//! Volume-driven series: Price Volume Trend, rolling VWAP, Ease of Movement.

use crate::components::indicator::{Indicator, IndicatorOutput};
use crate::domain::BarSet;
use crate::error::{aligned_len, rejected, require_period};
use crate::indicators::window::rolling_sum;

/// Volume divisor applied to Ease of Movement's box ratio.
pub const EOM_VOLUME_SCALE: f64 = 1e8;

/// Price Volume Trend: cumulative Σ (Δclose / prev_close) · volume.
///
/// Bar 0 is 0. A zero previous close carries the running value forward.
/// Mismatched lengths yield zeros of the close length.
pub fn pvt(close: &[f64], volume: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; close.len()];
    if let Err(e) = aligned_len(&[close, volume]) {
        rejected("pvt", e);
        return result;
    }

    for i in 1..close.len() {
        let prev = close[i - 1];
        result[i] = if prev == 0.0 {
            result[i - 1]
        } else {
            result[i - 1] + (close[i] - prev) / prev * volume[i]
        };
    }
    result
}

/// Typical-price VWAP over the trailing `period` bars.
///
/// Lookback: period - 1, zero-filled. A window with zero volume reads 0.
/// Mismatched lengths or `period == 0` → empty.
pub fn rolling_vwap(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    period: usize,
) -> Vec<f64> {
    let checked =
        aligned_len(&[high, low, close, volume]).and_then(|_| require_period("period", period, 1));
    if let Err(e) = checked {
        rejected("rolling_vwap", e);
        return Vec::new();
    }

    let weighted: Vec<f64> = (0..close.len())
        .map(|i| (high[i] + low[i] + close[i]) / 3.0 * volume[i])
        .collect();
    let weighted_sum = rolling_sum(&weighted, period);
    let volume_sum = rolling_sum(volume, period);
    weighted_sum
        .iter()
        .zip(&volume_sum)
        .map(|(&pv, &v)| if v == 0.0 { 0.0 } else { pv / v })
        .collect()
}

/// Raw Ease of Movement: midpoint move / (volume / 1e8 / (high - low)).
///
/// Bar 0 is 0; zero range or zero volume reads 0. Mismatch → empty.
pub fn ease_of_movement(high: &[f64], low: &[f64], volume: &[f64]) -> Vec<f64> {
    let n = match aligned_len(&[high, low, volume]) {
        Ok(n) => n,
        Err(e) => {
            rejected("ease_of_movement", e);
            return Vec::new();
        }
    };

    let mut result = vec![0.0; n];
    for i in 1..n {
        let range = high[i] - low[i];
        if range == 0.0 || volume[i] == 0.0 {
            continue;
        }
        let distance = (high[i] + low[i]) / 2.0 - (high[i - 1] + low[i - 1]) / 2.0;
        let box_ratio = volume[i] / EOM_VOLUME_SCALE / range;
        result[i] = distance / box_ratio;
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeSeries {
    PriceVolumeTrend,
    RollingVwap(usize),
    EaseOfMovement,
}

#[derive(Debug, Clone)]
pub struct VolumeIndicator {
    kind: VolumeSeries,
    name: String,
}

impl VolumeIndicator {
    pub fn new(kind: VolumeSeries) -> Self {
        let name = match kind {
            VolumeSeries::PriceVolumeTrend => "pvt".to_string(),
            VolumeSeries::RollingVwap(period) => format!("vwap_{period}"),
            VolumeSeries::EaseOfMovement => "eom".to_string(),
        };
        Self { kind, name }
    }
}

impl Indicator for VolumeIndicator {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.kind {
            VolumeSeries::PriceVolumeTrend | VolumeSeries::EaseOfMovement => 1,
            VolumeSeries::RollingVwap(period) => period.saturating_sub(1),
        }
    }

    fn compute(&self, bars: &BarSet) -> IndicatorOutput {
        let values = match self.kind {
            VolumeSeries::PriceVolumeTrend => pvt(&bars.close, &bars.volume),
            VolumeSeries::RollingVwap(period) => {
                rolling_vwap(&bars.high, &bars.low, &bars.close, &bars.volume, period)
            }
            VolumeSeries::EaseOfMovement => ease_of_movement(&bars.high, &bars.low, &bars.volume),
        };
        IndicatorOutput::single(values)
    }
}
