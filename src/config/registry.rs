//! Process-scoped configuration context
//!
//! A [`ConfigRegistry`] pairs the validated config with the transient
//! content-type selection. It is an explicit value, constructed where the
//! program starts and passed to whatever needs it; a fresh registry is a
//! full reset. The underlying config never mutates, only the content-type
//! overlay changes.

use serde_yaml::Value;
use tracing::debug;

use super::loader::{ConfigLoader, LoadOptions};
use super::schema::{ContentTypeConfig, WriteScoreConfig};
use super::ConfigError;

/// Content type accepted everywhere that applies no weight adjustments.
pub const GENERAL_CONTENT_TYPE: &str = "general";

#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    config: WriteScoreConfig,
    /// Merged tree the config was built from, kept for raw inspection
    raw: Value,
    content_type: Option<String>,
}

impl ConfigRegistry {
    pub fn new(config: WriteScoreConfig, raw: Value) -> Self {
        Self {
            config,
            raw,
            content_type: None,
        }
    }

    /// Load through `loader` and wrap the result.
    pub fn from_loader(loader: &ConfigLoader, options: LoadOptions) -> Result<Self, ConfigError> {
        let raw = loader.merged_value(&options)?;
        let config = WriteScoreConfig::from_value(raw.clone())?;
        Ok(Self::new(config, raw))
    }

    /// Embedded defaults plus the environment layer.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::from_loader(&ConfigLoader::new(), LoadOptions::default())
    }

    pub fn config(&self) -> &WriteScoreConfig {
        &self.config
    }

    /// Merged tree before typed deserialization.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Effective weight for `name`: the configured base weight times the
    /// active content type's multiplier (1.0 when none applies).
    pub fn dimension_weight(&self, name: &str) -> Option<f64> {
        let base = self.config.dimensions.get(name)?.weight;
        Some(base * self.adjustment_for(name))
    }

    pub fn dimension_weight_or(&self, name: &str, default: f64) -> f64 {
        self.dimension_weight(name).unwrap_or(default)
    }

    fn adjustment_for(&self, name: &str) -> f64 {
        self.content_type
            .as_deref()
            .and_then(|ct| self.config.content_types.get(ct))
            .and_then(|ct| ct.weight_adjustments.get(name))
            .copied()
            .unwrap_or(1.0)
    }

    /// Select the active content type. `general` is always accepted and
    /// applies no adjustments; any other name must be configured.
    pub fn set_content_type(&mut self, name: &str) -> Result<(), ConfigError> {
        if name != GENERAL_CONTENT_TYPE && !self.config.content_types.contains_key(name) {
            return Err(ConfigError::UnknownContentType(name.to_string()));
        }
        debug!(content_type = name, "content type selected");
        self.content_type = Some(name.to_string());
        Ok(())
    }

    /// Drop the content-type overlay; weights revert to configured values.
    pub fn clear_content_type(&mut self) {
        self.content_type = None;
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_type_config(&self, name: &str) -> Option<&ContentTypeConfig> {
        self.config.content_types.get(name)
    }

    /// `general` plus every configured content type, in config order.
    pub fn available_content_types(&self) -> Vec<&str> {
        let mut names = vec![GENERAL_CONTENT_TYPE];
        names.extend(self.config.content_types.keys().map(String::as_str));
        names
    }

    /// Enabled dimension names in config order.
    pub fn enabled_dimensions(&self) -> Vec<&str> {
        self.config
            .dimensions
            .iter()
            .filter(|(_, d)| d.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Dimension list of a named profile; `None` for an unknown profile.
    pub fn profile_dimensions(&self, name: &str) -> Option<&[String]> {
        self.config
            .profiles
            .get(name)
            .map(|p| p.dimensions.as_slice())
    }

    /// Resolve a dotted path under `scoring.thresholds`.
    pub fn threshold(&self, path: &str) -> Option<&Value> {
        let mut node = &self.config.scoring.thresholds;
        for segment in path.split('.') {
            node = node.get(segment)?;
        }
        Some(node)
    }

    pub fn threshold_f64(&self, path: &str, default: f64) -> f64 {
        self.threshold(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Label for `score` in the named category ladder.
    pub fn categorize(&self, category: &str, score: f64) -> Option<&str> {
        let ladder = self.config.scoring.categories.get(category)?;
        ladder
            .iter()
            .find(|(_, range)| range.contains(score))
            .map(|(label, _)| label.as_str())
    }
}
