//! Typed configuration schema
//!
//! Every shape either deserializes into a fully valid value or fails with a
//! [`ValidationError`] naming the offending field and constraint. Validation
//! is pure: it never touches the filesystem or environment.
//!
//! ```yaml
//! version: "1.0.0"
//!
//! dimensions:
//!   formatting:
//!     weight: 10.0
//!     tier: CORE
//!
//! content_types:
//!   technical:
//!     weight_adjustments: { structure: 1.2 }
//!
//! profiles:
//!   fast:
//!     dimensions: [formatting, burstiness]
//! ```

use super::ValidationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Dimension weights are percentages of the composite.
pub const MIN_WEIGHT: f64 = 0.0;
pub const MAX_WEIGHT: f64 = 100.0;

/// Tolerance for composite weight vectors that must sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Declared importance class of a dimension.
///
/// Used for improvement-action tie-breaking and for the quality-index blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum DimensionTier {
    Core,
    #[default]
    Supporting,
    Experimental,
}

impl DimensionTier {
    /// Ordering rank: Core sorts before Supporting before Experimental.
    pub fn rank(&self) -> u8 {
        match self {
            DimensionTier::Core => 0,
            DimensionTier::Supporting => 1,
            DimensionTier::Experimental => 2,
        }
    }
}

/// Per-dimension configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DimensionConfig {
    /// Contribution to the composite score (0-100)
    pub weight: f64,

    /// Importance class
    pub tier: DimensionTier,

    /// Whether the dimension participates in scoring (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

fn default_enabled() -> bool {
    true
}

impl DimensionConfig {
    /// Create a validated dimension config with default enablement.
    pub fn new(weight: f64, tier: DimensionTier) -> Result<Self, ValidationError> {
        let config = Self {
            weight,
            tier,
            enabled: true,
            description: String::new(),
        };
        config.validate("dimension")?;
        Ok(config)
    }

    /// Range-check the weight. `field` is the config path used in errors.
    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&self.weight) || !self.weight.is_finite() {
            return Err(ValidationError::new(
                format!("{field}.weight"),
                format!(
                    "weight {} outside allowed range {}..={}",
                    self.weight, MIN_WEIGHT, MAX_WEIGHT
                ),
            ));
        }
        Ok(())
    }
}

/// Named content-type preset
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContentTypeConfig {
    #[serde(default)]
    pub description: String,

    /// Multiplicative per-dimension weight adjustments applied while the
    /// content type is active
    #[serde(default)]
    pub weight_adjustments: IndexMap<String, f64>,

    /// Optional fixed-field vector used for quality-index blending
    #[serde(default)]
    pub composite_weights: ContentTypeWeights,
}

impl ContentTypeConfig {
    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for (name, multiplier) in &self.weight_adjustments {
            if *multiplier <= 0.0 || !multiplier.is_finite() {
                return Err(ValidationError::new(
                    format!("{field}.weight_adjustments.{name}"),
                    format!("multiplier {multiplier} must be a positive number"),
                ));
            }
        }
        self.composite_weights
            .validate(&format!("{field}.composite_weights"))
    }
}

/// Fixed-field composite weight vector.
///
/// The all-zero default is the explicit "unset" sentinel and is always valid;
/// any non-zero vector must sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentTypeWeights {
    pub perplexity: f64,
    pub burstiness: f64,
    pub structure: f64,
    pub formatting: f64,
    pub voice: f64,
    pub readability: f64,
    pub sentiment: f64,
    pub figurative_language: f64,
    pub transition_marker: f64,
    pub advanced_lexical: f64,
}

impl ContentTypeWeights {
    /// Field name / value pairs, in declaration order.
    pub fn as_pairs(&self) -> [(&'static str, f64); 10] {
        [
            ("perplexity", self.perplexity),
            ("burstiness", self.burstiness),
            ("structure", self.structure),
            ("formatting", self.formatting),
            ("voice", self.voice),
            ("readability", self.readability),
            ("sentiment", self.sentiment),
            ("figurative_language", self.figurative_language),
            ("transition_marker", self.transition_marker),
            ("advanced_lexical", self.advanced_lexical),
        ]
    }

    /// True when every field is zero (the unset sentinel).
    pub fn is_unset(&self) -> bool {
        self.as_pairs().iter().all(|(_, v)| *v == 0.0)
    }

    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.is_unset() {
            return Ok(());
        }
        let sum: f64 = self.as_pairs().iter().map(|(_, v)| v).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::new(
                field,
                format!("Weights must sum to 1.0 (got {sum:.3})"),
            ));
        }
        Ok(())
    }
}

/// Named subset of dimensions to run together
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub description: String,

    /// Participating dimension names, in run order
    #[serde(default)]
    pub dimensions: Vec<String>,
}

/// A half-open score range `[min_value, max_value)`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThresholdRange {
    pub min_value: f64,
    pub max_value: f64,
}

impl ThresholdRange {
    /// Create a validated range; `min_value >= max_value` is rejected.
    pub fn new(min_value: f64, max_value: f64) -> Result<Self, ValidationError> {
        let range = Self {
            min_value,
            max_value,
        };
        range.validate("threshold_range")?;
        Ok(range)
    }

    pub fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.min_value >= self.max_value {
            return Err(ValidationError::new(
                field,
                format!(
                    "min_value {} must be less than max_value {}",
                    self.min_value, self.max_value
                ),
            ));
        }
        Ok(())
    }

    /// Containment check; the upper bound is inclusive only at 100.0 so the
    /// top category of a full-range ladder captures a perfect score.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_value && (score < self.max_value || (score == 100.0 && self.max_value == 100.0))
    }
}

/// Scoring thresholds and category ladders
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Free-form scalar tree resolved by dotted path
    /// (e.g. `scoring.thresholds.ai_likely`)
    #[serde(default)]
    pub thresholds: serde_yaml::Value,

    /// Category name → (label → score range); each ladder must cover
    /// 0-100 contiguously
    #[serde(default)]
    pub categories: IndexMap<String, IndexMap<String, ThresholdRange>>,
}

impl ScoringConfig {
    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        for (category, ladder) in &self.categories {
            let path = format!("{field}.categories.{category}");
            let mut ranges: Vec<(&String, &ThresholdRange)> = Vec::with_capacity(ladder.len());
            for (label, range) in ladder {
                range.validate(&format!("{path}.{label}"))?;
                ranges.push((label, range));
            }
            ranges.sort_by(|a, b| a.1.min_value.total_cmp(&b.1.min_value));

            let mut cursor = 0.0;
            for (label, range) in &ranges {
                if (range.min_value - cursor).abs() > 1e-9 {
                    return Err(ValidationError::new(
                        format!("{path}.{label}"),
                        format!("ranges must tile 0-100; gap or overlap at {cursor}"),
                    ));
                }
                cursor = range.max_value;
            }
            if !ranges.is_empty() && (cursor - 100.0).abs() > 1e-9 {
                return Err(ValidationError::new(
                    path,
                    format!("ranges must reach 100.0 (stopped at {cursor})"),
                ));
            }
        }
        Ok(())
    }
}

/// Root configuration. Immutable once constructed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WriteScoreConfig {
    /// Semantic version of the config schema (`MAJOR.MINOR.PATCH`)
    pub version: String,

    #[serde(default)]
    pub dimensions: IndexMap<String, DimensionConfig>,

    #[serde(default)]
    pub content_types: IndexMap<String, ContentTypeConfig>,

    #[serde(default)]
    pub profiles: IndexMap<String, ProfileConfig>,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl WriteScoreConfig {
    /// Deserialize and validate a merged configuration tree.
    pub fn from_value(value: serde_yaml::Value) -> Result<Self, ValidationError> {
        let config: Self = serde_yaml::from_value(value)
            .map_err(|e| ValidationError::new("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Field and cross-field invariants for the whole tree.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_semver(&self.version) {
            return Err(ValidationError::new(
                "version",
                format!(
                    "Version must be in format MAJOR.MINOR.PATCH (got '{}')",
                    self.version
                ),
            ));
        }

        for (name, dimension) in &self.dimensions {
            dimension.validate(&format!("dimensions.{name}"))?;
        }

        for (name, content_type) in &self.content_types {
            let field = format!("content_types.{name}");
            content_type.validate(&field)?;
            let unknown: Vec<&str> = content_type
                .weight_adjustments
                .keys()
                .filter(|d| !self.dimensions.contains_key(*d))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                return Err(ValidationError::new(
                    format!("{field}.weight_adjustments"),
                    format!("Unknown dimensions: {}", unknown.join(", ")),
                ));
            }
        }

        for (name, profile) in &self.profiles {
            let unknown: Vec<&str> = profile
                .dimensions
                .iter()
                .filter(|d| !self.dimensions.contains_key(*d))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                return Err(ValidationError::new(
                    format!("profiles.{name}.dimensions"),
                    format!("Unknown dimensions: {}", unknown.join(", ")),
                ));
            }
        }

        self.scoring.validate("scoring")
    }

    /// Profile lookup paired with its validated dimension list.
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }
}

/// Strict `MAJOR.MINOR.PATCH` check: three non-empty all-digit parts.
fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}
