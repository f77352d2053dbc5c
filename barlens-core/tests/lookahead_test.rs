//! Look-ahead contamination tests.
//!
//! Invariant: no indicator value at bar t may depend on price data from bar
//! t+1 or later. The Ichimoku Chikou span is the one exception (a backward
//! shift of close by definition) and is skipped.
//!
//! Method: compute on a truncated series (bars 0..100) and the full series
//! (bars 0..200). Assert bars 0..100 are identical between both runs. Any
//! difference means the indicator is leaking future data into past values.

use barlens_core::components::indicator::Indicator;
use barlens_core::domain::BarSet;
use barlens_core::indicators::*;

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> BarSet {
    let mut open = Vec::with_capacity(n);
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);
    let mut close = Vec::with_capacity(n);
    let mut volume = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price = (price + change).max(10.0);

        let o = price - 0.5;
        let c = price + 0.3;
        open.push(o);
        close.push(c);
        high.push(o.max(c) + 2.0);
        low.push(o.min(c) - 2.0);
        volume.push(1000.0 + i as f64 * 100.0);
    }

    BarSet::new(open, high, low, close, volume)
}

/// Assert that every component of the indicator is identical on bars
/// 0..truncated_len whether computed on a truncated or the full series.
fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &BarSet, truncated_len: usize) {
    let truncated = full_bars.head(truncated_len);
    let full_result = indicator.compute(full_bars);
    let truncated_result = indicator.compute(&truncated);

    for (component, full) in full_result.components() {
        if component == "chikou" {
            continue;
        }
        let name = format!("{}.{component}", indicator.name());
        let part = truncated_result
            .get(component)
            .unwrap_or_else(|| panic!("{name}: missing from truncated result"));

        assert_eq!(part.len(), truncated_len, "{name}: truncated result length mismatch");
        assert_eq!(full.len(), full_bars.len(), "{name}: full result length mismatch");

        for i in 0..truncated_len {
            let t = part[i];
            let f = full[i];
            if t.is_nan() && f.is_nan() {
                continue;
            }
            assert!(
                !t.is_nan() && !f.is_nan(),
                "{name}: NaN mismatch at bar {i} (truncated={t}, full={f})"
            );
            assert!(
                (t - f).abs() < 1e-9,
                "{name}: look-ahead contamination at bar {i}: truncated={t}, full={f}"
            );
        }
    }
}

#[test]
fn lookahead_smoothers() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Sma::new(10), &bars, 100);
    assert_no_lookahead(&Ema::new(20), &bars, 100);
    assert_no_lookahead(&Ema::double(10), &bars, 100);
    assert_no_lookahead(&Ema::triple(10), &bars, 100);
    assert_no_lookahead(&Kama::new(10), &bars, 100);
    assert_no_lookahead(&Weighted::wma(10), &bars, 100);
    assert_no_lookahead(&Weighted::hull(16), &bars, 100);
    assert_no_lookahead(&Disparity::default(), &bars, 100);
    assert_no_lookahead(&ZScore::new(20), &bars, 100);
}

#[test]
fn lookahead_volatility() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Atr::new(14), &bars, 100);
    assert_no_lookahead(&Atr::simple(14), &bars, 100);
    assert_no_lookahead(&Bollinger::new(20, 2.0), &bars, 100);
    assert_no_lookahead(&PercentB, &bars, 100);
    assert_no_lookahead(&Donchian::new(20, 10), &bars, 100);
}

#[test]
fn lookahead_oscillators() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Rsi::new(14), &bars, 100);
    assert_no_lookahead(&Rsi::volume_weighted(14), &bars, 100);
    assert_no_lookahead(&Macd::new(12, 26, 9), &bars, 100);
    assert_no_lookahead(&Macd::volume_weighted(12, 26, 9), &bars, 100);
    assert_no_lookahead(&Stochastic::new(14, 3, false), &bars, 100);
    assert_no_lookahead(&Vortex::new(14), &bars, 100);
    assert_no_lookahead(&Cmf::new(20), &bars, 100);
    assert_no_lookahead(&Kvo::default(), &bars, 100);
}

#[test]
fn lookahead_trend() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&Supertrend::new(10, 3.0), &bars, 100);
    assert_no_lookahead(&Supertrend::new(7, 2.0), &bars, 100);
    assert_no_lookahead(&Ichimoku::default(), &bars, 100);
    assert_no_lookahead(&Adx::new(14), &bars, 100);
}

#[test]
fn lookahead_volume_and_power() {
    let bars = make_test_bars(200);
    assert_no_lookahead(&ElderPower::bull(), &bars, 100);
    assert_no_lookahead(&ElderPower::bear(), &bars, 100);
    assert_no_lookahead(&ForceIndex::new(13), &bars, 100);
    assert_no_lookahead(&VolumeIndicator::new(VolumeSeries::PriceVolumeTrend), &bars, 100);
    assert_no_lookahead(&VolumeIndicator::new(VolumeSeries::RollingVwap(20)), &bars, 100);
    assert_no_lookahead(&VolumeIndicator::new(VolumeSeries::EaseOfMovement), &bars, 100);
    assert_no_lookahead(&Pivot, &bars, 100);
    assert_no_lookahead(&PatternSignal::new(Pattern::HeadShoulders), &bars, 100);
    assert_no_lookahead(&PatternSignal::new(Pattern::InstBlockTrade), &bars, 100);
}
