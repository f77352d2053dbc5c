//! Concrete indicator implementations.
//!
//! Every module exposes plain functions over `&[f64]` columns (the numeric
//! API) plus a struct implementing the `Indicator` trait from
//! `components::indicator`, so indicators can be configured and precomputed
//! as a set. Multi-series indicators return a named result struct and map it
//! to named components of an `IndicatorOutput`.
//!
//! Rejected input never panics or returns `Err`: each function documents the
//! shape it answers with instead (empty, `None`, zero- or NaN-filled).

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cmf;
pub mod disparity;
pub mod donchian;
pub mod elder;
pub mod ema;
pub mod hma;
pub mod ichimoku;
pub mod kama;
pub mod kvo;
pub mod macd;
pub mod patterns;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod volume;
pub mod vortex;
pub mod window;
pub mod zscore;

pub use adx::{adx, Adx};
pub use atr::{atr, atr_sma, true_range, wilder_smooth, Atr, AtrSmoothing};
pub use bollinger::{bollinger, percent_b, Bollinger, BollingerBands, PercentB};
pub use cmf::{cmf, Cmf};
pub use disparity::{disparity, Disparity, DISPARITY_PERIOD};
pub use donchian::{donchian, Donchian, DonchianChannels};
pub use elder::{elder_bear, elder_bull, force_index, ElderPower, ElderSide, ForceIndex};
pub use ema::{dema, ema, tema, Ema, EmaKind};
pub use hma::{hma, hma_lookback, wma, Weighted, WeightedKind, DEFAULT_HMA_LENGTH};
pub use ichimoku::{ichimoku, ichimoku_with, Ichimoku, IchimokuParams, IchimokuResult};
pub use kama::{kama, Kama};
pub use kvo::{kvo, kvo_with_spans, Kvo, KvoResult};
pub use macd::{macd, macd_lookback, volume_weighted_macd, Macd, MacdResult};
pub use patterns::{
    head_shoulders, inst_block_trade, Pattern, PatternSignal, BLOCK_VOLUME_MULTIPLE,
    BLOCK_VOLUME_WINDOW, SHOULDERS_SPAN,
};
pub use pivot::{pivot_points, Pivot, PivotLevels};
pub use rsi::{rsi, volume_weighted_rsi, Rsi, RsiWeighting};
pub use sma::{sma, Sma};
pub use stochastic::{stochastic, Stochastic, StochasticResult};
pub use supertrend::{supertrend, Supertrend, SupertrendResult};
pub use volume::{ease_of_movement, pvt, rolling_vwap, VolumeIndicator, VolumeSeries};
pub use vortex::{vortex, Vortex, VortexResult};
pub use window::{rolling_max, rolling_mean, rolling_min, rolling_std, rolling_sum, rolling_variance};
pub use zscore::{zscore, ZScore};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> crate::domain::BarSet {
    let open: Vec<f64> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| if i == 0 { close } else { closes[i - 1] })
        .collect();
    let high = open.iter().zip(closes).map(|(o, c)| o.max(*c) + 1.0).collect();
    let low = open.iter().zip(closes).map(|(o, c)| o.min(*c) - 1.0).collect();
    crate::domain::BarSet::new(open, high, low, closes.to_vec(), vec![1000.0; closes.len()])
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
