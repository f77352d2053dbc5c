//! Builds boxed indicators from `IndicatorConfig` entries.
//!
//! Missing parameters fall back to the conventional default for each
//! indicator. Parameters are stored as `f64`; period-like values are
//! truncated to `usize`, so a negative value becomes 0 and is then handled
//! by that indicator's own rejection contract.

use crate::config::IndicatorConfig;
use crate::indicators::{
    Adx, Atr, Bollinger, Cmf, Disparity, Donchian, ElderPower, Ema, ForceIndex, Ichimoku,
    IchimokuParams, Kama, Kvo, Macd, Pattern, PatternSignal, PercentB, Pivot, Rsi, Sma,
    Stochastic, Supertrend, VolumeIndicator, VolumeSeries, Vortex, Weighted, ZScore,
    DEFAULT_HMA_LENGTH, DISPARITY_PERIOD,
};

use super::indicator::Indicator;

// ─── Error type ──────────────────────────────────────────────────────

/// Errors that can occur during indicator construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactoryError {
    #[error("Unknown indicator type: {0}")]
    UnknownIndicator(String),
    #[error("Parameter {param} of {indicator} is not a finite number: {value}")]
    NonFiniteParam {
        indicator: String,
        param: String,
        value: f64,
    },
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Extract a named f64 parameter from an `IndicatorConfig`, falling back to `default`.
fn param(config: &IndicatorConfig, name: &str, default: f64) -> f64 {
    config.params.get(name).copied().unwrap_or(default)
}

/// Extract a named usize parameter from an `IndicatorConfig`, falling back to `default`.
fn param_usize(config: &IndicatorConfig, name: &str, default: usize) -> usize {
    config
        .params
        .get(name)
        .copied()
        .map(|v| v as usize)
        .unwrap_or(default)
}

fn param_flag(config: &IndicatorConfig, name: &str) -> bool {
    param(config, name, 0.0) != 0.0
}

fn check_finite(config: &IndicatorConfig) -> Result<(), FactoryError> {
    match config.params.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, &value)) => Err(FactoryError::NonFiniteParam {
            indicator: config.indicator.clone(),
            param: name.clone(),
            value,
        }),
        None => Ok(()),
    }
}

// ─── Indicator factory ───────────────────────────────────────────────

/// Create an indicator from an `IndicatorConfig`.
pub fn create_indicator(config: &IndicatorConfig) -> Result<Box<dyn Indicator>, FactoryError> {
    check_finite(config)?;

    match config.indicator.as_str() {
        "sma" => Ok(Box::new(Sma::new(param_usize(config, "period", 20)))),
        "ema" => Ok(Box::new(Ema::new(param_usize(config, "period", 20)))),
        "dema" => Ok(Box::new(Ema::double(param_usize(config, "period", 20)))),
        "tema" => Ok(Box::new(Ema::triple(param_usize(config, "period", 20)))),
        "kama" => Ok(Box::new(Kama::new(param_usize(config, "period", 10)))),
        "wma" => Ok(Box::new(Weighted::wma(param_usize(config, "period", 20)))),
        "hma" => Ok(Box::new(Weighted::hull(param_usize(
            config,
            "length",
            DEFAULT_HMA_LENGTH,
        )))),
        "adx" => Ok(Box::new(Adx::new(param_usize(config, "period", 14)))),
        "disp" => Ok(Box::new(Disparity::new(param_usize(
            config,
            "period",
            DISPARITY_PERIOD,
        )))),
        "atr" => Ok(Box::new(Atr::new(param_usize(config, "period", 14)))),
        "atr_sma" => Ok(Box::new(Atr::simple(param_usize(config, "period", 14)))),
        "rsi" => Ok(Box::new(Rsi::new(param_usize(config, "period", 14)))),
        "vwrsi" => Ok(Box::new(Rsi::volume_weighted(param_usize(
            config, "period", 14,
        )))),
        "macd" | "vwmacd" => {
            let fast = param_usize(config, "fast", 12);
            let slow = param_usize(config, "slow", 26);
            let signal = param_usize(config, "signal", 9);
            if config.indicator == "vwmacd" {
                Ok(Box::new(Macd::volume_weighted(fast, slow, signal)))
            } else {
                Ok(Box::new(Macd::new(fast, slow, signal)))
            }
        }
        "bollinger" => {
            let period = param_usize(config, "period", 20);
            let multiplier = param(config, "multiplier", 2.0);
            Ok(Box::new(Bollinger::new(period, multiplier)))
        }
        "percent_b" => Ok(Box::new(PercentB)),
        "zscore" => Ok(Box::new(ZScore::new(param_usize(config, "window", 20)))),
        "stochastic" => {
            let window = param_usize(config, "window", 14);
            let smooth_window = param_usize(config, "smooth_window", 3);
            let fill_na = param_flag(config, "fill_na");
            Ok(Box::new(Stochastic::new(window, smooth_window, fill_na)))
        }
        "vortex" => Ok(Box::new(Vortex::new(param_usize(config, "period", 14)))),
        "cmf" => Ok(Box::new(Cmf::new(param_usize(config, "period", 20)))),
        "kvo" => {
            let fast = param_usize(config, "fast", 34);
            let slow = param_usize(config, "slow", 55);
            let signal = param_usize(config, "signal", 13);
            Ok(Box::new(Kvo::new(fast, slow, signal)))
        }
        "supertrend" => {
            let period = param_usize(config, "period", 7);
            let multiplier = param(config, "multiplier", 3.0);
            Ok(Box::new(Supertrend::new(period, multiplier)))
        }
        "ichimoku" => {
            let defaults = IchimokuParams::default();
            let params = IchimokuParams {
                tenkan: param_usize(config, "tenkan", defaults.tenkan),
                kijun: param_usize(config, "kijun", defaults.kijun),
                senkou_b: param_usize(config, "senkou_b", defaults.senkou_b),
                displacement: param_usize(config, "displacement", defaults.displacement),
            };
            Ok(Box::new(Ichimoku::new(params)))
        }
        "donchian" => {
            let lower_len = param_usize(config, "lower_len", 20);
            let upper_len = param_usize(config, "upper_len", 20);
            Ok(Box::new(Donchian::new(lower_len, upper_len)))
        }
        "elder_bull" => Ok(Box::new(ElderPower::bull())),
        "elder_bear" => Ok(Box::new(ElderPower::bear())),
        "force_index" => Ok(Box::new(ForceIndex::new(param_usize(config, "length", 13)))),
        "pvt" => Ok(Box::new(VolumeIndicator::new(VolumeSeries::PriceVolumeTrend))),
        "rolling_vwap" => Ok(Box::new(VolumeIndicator::new(VolumeSeries::RollingVwap(
            param_usize(config, "period", 20),
        )))),
        "eom" => Ok(Box::new(VolumeIndicator::new(VolumeSeries::EaseOfMovement))),
        "pivot" => Ok(Box::new(Pivot)),
        "head_shoulders" => Ok(Box::new(PatternSignal::new(Pattern::HeadShoulders))),
        "inst_block_trade" => Ok(Box::new(PatternSignal::new(Pattern::InstBlockTrade))),
        other => Err(FactoryError::UnknownIndicator(other.to_string())),
    }
}

/// Create every indicator in a list of configs, stopping at the first error.
pub fn create_indicators(
    configs: &[IndicatorConfig],
) -> Result<Vec<Box<dyn Indicator>>, FactoryError> {
    configs.iter().map(create_indicator).collect()
}
