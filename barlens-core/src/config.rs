//! Indicator set configuration.
//!
//! An indicator set is a TOML document of `[[indicator]]` tables:
//!
//! ```toml
//! [[indicator]]
//! indicator = "macd"
//! params = { fast = 12, slow = 26, signal = 9 }
//!
//! [[indicator]]
//! indicator = "supertrend"
//! ```
//!
//! Parameters are numeric; missing ones take the factory defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::components::factory::{create_indicator, FactoryError};
use crate::components::indicator::Indicator;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read indicator config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse indicator config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize indicator config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

/// One configured indicator: registry name plus numeric parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub indicator: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl IndicatorConfig {
    pub fn new(indicator: impl Into<String>) -> Self {
        Self {
            indicator: indicator.into(),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style parameter insert.
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// An ordered list of indicator configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    #[serde(default, rename = "indicator")]
    pub indicators: Vec<IndicatorConfig>,
}

impl IndicatorSet {
    /// Load an indicator set from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse an indicator set from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let set: Self = toml::from_str(content)?;
        tracing::debug!(count = set.indicators.len(), "loaded indicator set");
        Ok(set)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Instantiate every configured indicator.
    pub fn build(&self) -> Result<Vec<Box<dyn Indicator>>, ConfigError> {
        let built = self
            .indicators
            .iter()
            .map(create_indicator)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(built)
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[indicator]]
indicator = "macd"
params = { fast = 12, slow = 26, signal = 9 }

[[indicator]]
indicator = "bollinger"

[indicator.params]
period = 20
multiplier = 2.5

[[indicator]]
indicator = "supertrend"
"#;

    #[test]
    fn parse_indicator_set() {
        let set = IndicatorSet::from_toml(SAMPLE).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.indicators[0].indicator, "macd");
        assert_eq!(set.indicators[0].params["slow"], 26.0);
        assert_eq!(set.indicators[1].params["multiplier"], 2.5);
        assert!(set.indicators[2].params.is_empty());
    }

    #[test]
    fn build_indicator_set() {
        let built = IndicatorSet::from_toml(SAMPLE).unwrap().build().unwrap();
        let names: Vec<&str> = built.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["macd_12_26_9", "bollinger_20_2.5", "supertrend_7_3"]);
    }

    #[test]
    fn empty_document_is_empty_set() {
        assert!(IndicatorSet::from_toml("").unwrap().is_empty());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = IndicatorSet::from_toml("[[indicator]\nindicator = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_indicator_is_factory_error() {
        let set = IndicatorSet {
            indicators: vec![IndicatorConfig::new("mystery")],
        };
        let err = set.build().err().unwrap();
        assert!(matches!(
            err,
            ConfigError::Factory(FactoryError::UnknownIndicator(_))
        ));
    }

    #[test]
    fn toml_roundtrip_preserves_params() {
        let set = IndicatorSet {
            indicators: vec![IndicatorConfig::new("rsi").with_param("period", 7.0)],
        };
        let text = set.to_toml().unwrap();
        assert_eq!(IndicatorSet::from_toml(&text).unwrap(), set);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = IndicatorSet::from_file(Path::new("/nonexistent/indicators.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
