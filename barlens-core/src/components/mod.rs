//! Indicator trait, output containers and the config-driven factory.

pub mod factory;
pub mod indicator;

pub use factory::{create_indicator, FactoryError};
pub use indicator::{Indicator, IndicatorOutput, IndicatorValues, VALUE};
