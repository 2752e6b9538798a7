//! Dimension contract
//!
//! A dimension measures one stylistic axis of a text and reduces it to a
//! 0-100 score, 100 reading as strongly human. Analysis never fails: a
//! dimension that cannot measure its input returns metrics flagged
//! unavailable, and scoring maps those to [`NEUTRAL_SCORE`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{DimensionTier, ThresholdRange};

/// Score reported when a dimension cannot judge its input.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Measurement payload produced by [`Dimension::analyze`].
///
/// A flat key/value map plus the availability flag. The aggregation core
/// only ever reads the flag; the keys are private vocabulary between a
/// dimension's `analyze` and its `calculate_score`.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionMetrics {
    available: bool,
    values: Map<String, Value>,
}

impl DimensionMetrics {
    /// Available metrics with no values yet.
    pub fn new() -> Self {
        Self {
            available: true,
            values: Map::new(),
        }
    }

    /// The "could not measure" result.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            values: Map::new(),
        }
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(Value::as_u64)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl Default for DimensionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A qualitative score band.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreTier {
    pub label: &'static str,
    pub range: ThresholdRange,
}

/// The band ladder most dimensions share. Covers 0-100 without gaps.
pub fn standard_tiers() -> Vec<ScoreTier> {
    [
        ("poor", 0.0, 40.0),
        ("acceptable", 40.0, 60.0),
        ("good", 60.0, 75.0),
        ("excellent", 75.0, 100.0),
    ]
    .into_iter()
    .map(|(label, min_value, max_value)| ScoreTier {
        label,
        range: ThresholdRange {
            min_value,
            max_value,
        },
    })
    .collect()
}

/// One pluggable stylistic analyzer.
pub trait Dimension: Send + Sync {
    /// Unique registry key.
    fn name(&self) -> &'static str;

    /// Default composite weight; the effective weight comes from config.
    fn weight(&self) -> f64;

    fn tier(&self) -> DimensionTier;

    fn description(&self) -> &'static str;

    /// Measure `text`. Must not fail: malformed or empty input yields
    /// [`DimensionMetrics::unavailable`].
    fn analyze(&self, text: &str) -> DimensionMetrics;

    /// Reduce metrics to a score in `[0, 100]`. Unavailable metrics map to
    /// [`NEUTRAL_SCORE`], as do metrics missing required fields.
    fn calculate_score(&self, metrics: &DimensionMetrics) -> f64;

    /// Concrete suggestions for raising a low score, most impactful first.
    fn recommendations(&self, score: f64, metrics: &DimensionMetrics) -> Vec<String>;

    /// Qualitative band ladder for this dimension's scores.
    fn tiers(&self) -> Vec<ScoreTier> {
        standard_tiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_roundtrip() {
        let metrics = DimensionMetrics::new()
            .with("ratio", 0.25)
            .with("count", 7);
        assert!(metrics.available());
        assert_eq!(metrics.get_f64("ratio"), Some(0.25));
        assert_eq!(metrics.get_u64("count"), Some(7));
        assert_eq!(metrics.get_f64("missing"), None);
    }

    #[test]
    fn test_unavailable_metrics() {
        let metrics = DimensionMetrics::unavailable();
        assert!(!metrics.available());
        assert!(metrics.values().is_empty());
    }

    #[test]
    fn test_standard_tiers_cover_full_range() {
        let tiers = standard_tiers();
        let mut cursor = 0.0;
        for tier in &tiers {
            assert_eq!(tier.range.min_value, cursor);
            assert!(tier.range.min_value < tier.range.max_value);
            cursor = tier.range.max_value;
        }
        assert_eq!(cursor, 100.0);
    }
}
