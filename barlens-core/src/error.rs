//! Input rejection reasons.
//!
//! Indicators never surface these to callers as `Err`: a rejected input is
//! logged and turned into the indicator's documented result shape. The
//! validation helpers below are shared by every indicator module.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("input series length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("insufficient data: need {required} bars, got {got}")]
    InsufficientData { required: usize, got: usize },
    #[error("empty input series")]
    EmptyInput,
    #[error("window parameters overflow the bar index range")]
    SpanOverflow,
}

/// Common length of a set of parallel series, or the first mismatch.
pub fn aligned_len(series: &[&[f64]]) -> Result<usize, IndicatorError> {
    let expected = series.first().map(|s| s.len()).unwrap_or(0);
    match series.iter().find(|s| s.len() != expected) {
        Some(s) => Err(IndicatorError::LengthMismatch {
            expected,
            got: s.len(),
        }),
        None => Ok(expected),
    }
}

/// Reject a period below `min`.
pub fn require_period(name: &'static str, period: usize, min: usize) -> Result<(), IndicatorError> {
    if period < min {
        return Err(IndicatorError::InvalidParameter {
            name,
            value: period as f64,
        });
    }
    Ok(())
}

/// Reject a series shorter than `required`.
pub fn require_len(len: usize, required: usize) -> Result<(), IndicatorError> {
    if len < required {
        return Err(IndicatorError::InsufficientData { required, got: len });
    }
    Ok(())
}

/// Bars covered by chained windows: the sum of `spans` minus `overlap`.
///
/// Parameters large enough to overflow `usize` are rejected rather than
/// wrapped, so a huge configured period reads as insufficient data.
pub fn chained_span(spans: &[usize], overlap: usize) -> Result<usize, IndicatorError> {
    spans
        .iter()
        .try_fold(0usize, |total, &span| total.checked_add(span))
        .map(|total| total.saturating_sub(overlap))
        .ok_or(IndicatorError::SpanOverflow)
}

/// Log a rejection at debug level and pass the error through.
pub(crate) fn rejected(indicator: &'static str, err: IndicatorError) -> IndicatorError {
    tracing::debug!(indicator, error = %err, "input rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_len_equal() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        assert_eq!(aligned_len(&[&a, &b]), Ok(2));
    }

    #[test]
    fn aligned_len_reports_first_mismatch() {
        let a = [1.0, 2.0, 3.0];
        let b = [3.0, 4.0];
        assert_eq!(
            aligned_len(&[&a, &b]),
            Err(IndicatorError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn aligned_len_no_series() {
        assert_eq!(aligned_len(&[]), Ok(0));
    }

    #[test]
    fn require_period_and_len() {
        assert!(require_period("period", 0, 1).is_err());
        assert!(require_period("period", 1, 1).is_ok());
        assert_eq!(
            require_len(3, 5),
            Err(IndicatorError::InsufficientData {
                required: 5,
                got: 3
            })
        );
    }

    #[test]
    fn chained_span_sums_and_overlaps() {
        assert_eq!(chained_span(&[14, 3], 1), Ok(16));
        assert_eq!(chained_span(&[5], 0), Ok(5));
        assert_eq!(chained_span(&[usize::MAX, 2], 1), Err(IndicatorError::SpanOverflow));
        assert_eq!(chained_span(&[usize::MAX, 1], 1), Err(IndicatorError::SpanOverflow));
    }

    #[test]
    fn error_messages() {
        let err = IndicatorError::InvalidParameter {
            name: "period",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "invalid parameter period: 0");
    }
}
