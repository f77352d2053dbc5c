//! BarLens Core: technical indicators over OHLCV series.
//!
//! This crate contains the indicator engine:
//! - Domain types (bars and parallel bar columns)
//! - Rolling-window primitives (sum, mean, variance, extrema)
//! - Smoothers (SMA, EMA, Wilder) and True Range / ATR
//! - Composite oscillators (MACD, RSI, Stochastic, Vortex, CMF, KVO, ...)
//! - Stateful trend indicators (Supertrend, KAMA) and Ichimoku
//! - Indicator trait, config-driven factory and parallel precompute
//!
//! Every indicator is a pure function of its input series. Invalid input never
//! panics or returns `Err`: each indicator signals it through the shape of the
//! returned series (empty, `None`, or a documented fill value).

pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;

pub use error::IndicatorError;
