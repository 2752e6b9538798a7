//! Layered configuration loading
//!
//! Builds the effective config from up to four layers, lowest priority first:
//!
//! 1. base file (embedded `default.yaml` unless a path is given)
//! 2. local override file, when present
//! 3. `WRITESCORE_*` environment variables
//! 4. programmatic overrides
//!
//! Layers are deep-merged: mappings merge recursively, everything else
//! (scalars, sequences) is replaced wholesale by the higher layer. The local
//! file is validated against the base alone before the remaining layers are
//! applied, so a broken local file is reported by its own path.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use super::schema::WriteScoreConfig;
use super::ConfigError;

/// Base configuration compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.yaml");

/// Prefix recognized on environment variable overrides.
pub const ENV_PREFIX: &str = "WRITESCORE_";

/// Per-dimension fields settable from the environment. Matched against the
/// right end of the variable name so dimension names may themselves contain
/// underscores (`WRITESCORE_DIMENSIONS_TRANSITION_MARKER_WEIGHT`).
const DIMENSION_ENV_FIELDS: [&str; 4] = ["WEIGHT", "TIER", "ENABLED", "DESCRIPTION"];

/// Loads and merges configuration layers.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Base file path; `None` uses the embedded default
    base_path: Option<PathBuf>,
    /// Local override file; missing file is not an error
    local_path: Option<PathBuf>,
}

/// Per-call load options.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Highest-priority layer, merged last
    pub overrides: Option<Value>,
    /// Skip the local override file even if configured
    pub skip_local: bool,
    /// Skip the environment layer
    pub skip_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the base layer from `path` instead of the embedded default.
    /// The file must exist at load time.
    pub fn with_base_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Merge `path` over the base when the file exists.
    pub fn with_local_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Load with default options.
    pub fn load(&self) -> Result<WriteScoreConfig, ConfigError> {
        self.load_with(LoadOptions::default())
    }

    pub fn load_with(&self, options: LoadOptions) -> Result<WriteScoreConfig, ConfigError> {
        let merged = self.merged_value(&options)?;
        Ok(WriteScoreConfig::from_value(merged)?)
    }

    /// Produce the merged raw tree without final typed validation.
    pub fn merged_value(&self, options: &LoadOptions) -> Result<Value, ConfigError> {
        let base = self.load_base()?;
        let mut merged = base.clone();

        if !options.skip_local {
            if let Some(local_path) = &self.local_path {
                if local_path.exists() {
                    let local = load_yaml_file(local_path)?;
                    // Validate base+local in isolation so errors name the
                    // local file rather than the fully merged tree.
                    let partial = deep_merge(&base, &local);
                    WriteScoreConfig::from_value(partial).map_err(|source| {
                        ConfigError::PartialValidation {
                            path: local_path.clone(),
                            source,
                        }
                    })?;
                    debug!(path = %local_path.display(), "applied local config overrides");
                    merged = deep_merge(&merged, &local);
                } else {
                    debug!(path = %local_path.display(), "local config not present, skipping");
                }
            }
        }

        if !options.skip_env {
            let env_layer = env_overlay(ENV_PREFIX, std::env::vars());
            if env_layer != Value::Mapping(Mapping::new()) {
                debug!("applied environment config overrides");
                merged = deep_merge(&merged, &env_layer);
            }
        }

        if let Some(overrides) = &options.overrides {
            merged = deep_merge(&merged, overrides);
        }

        Ok(merged)
    }

    fn load_base(&self) -> Result<Value, ConfigError> {
        match &self.base_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingBaseFile(path.clone()));
                }
                load_yaml_file(path)
            }
            None => parse_yaml(DEFAULT_CONFIG, Path::new("<embedded default.yaml>")),
        }
    }
}

fn load_yaml_file(path: &Path) -> Result<Value, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&text, path)
}

/// Parse YAML text; an empty or comment-only file yields an empty mapping.
fn parse_yaml(text: &str, path: &Path) -> Result<Value, ConfigError> {
    let value: Value = serde_yaml::from_str(text).map_err(|source| ConfigError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    })
}

/// Merge `overlay` over `base` without mutating either.
///
/// Two mappings merge key by key, recursively. Any other pairing takes the
/// overlay value wholesale, so lists are replaced rather than appended.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut out = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let merged = match out.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Mapping(out)
        }
        _ => overlay.clone(),
    }
}

/// Build a config fragment from prefixed environment variables.
///
/// Takes the variables as an iterator so tests can inject fixtures instead of
/// mutating process state. Variables with the prefix but an unrecognized
/// shape are logged and skipped; the environment can adjust known settings
/// but never invent config keys.
pub fn env_overlay(prefix: &str, vars: impl Iterator<Item = (String, String)>) -> Value {
    let mut root = Mapping::new();
    for (key, raw) in vars {
        let Some(stripped) = key.strip_prefix(prefix) else {
            continue;
        };
        // WRITESCORE_LOG belongs to the CLI, not the config tree
        if stripped == "LOG" {
            continue;
        }
        match env_key_to_path(stripped) {
            Some(path) => insert_path(&mut root, &path, coerce_scalar(&raw)),
            None => warn!(var = %key, "unrecognized environment override, ignoring"),
        }
    }
    Value::Mapping(root)
}

/// Map an uppercase env key (prefix already stripped) to a config path.
fn env_key_to_path(key: &str) -> Option<Vec<String>> {
    if key == "VERSION" {
        return Some(vec!["version".to_string()]);
    }
    if let Some(rest) = key.strip_prefix("DIMENSIONS_") {
        for field in DIMENSION_ENV_FIELDS {
            if let Some(name) = rest.strip_suffix(field) {
                let name = name.strip_suffix('_')?;
                if name.is_empty() {
                    return None;
                }
                return Some(vec![
                    "dimensions".to_string(),
                    name.to_lowercase(),
                    field.to_lowercase(),
                ]);
            }
        }
        return None;
    }
    if let Some(rest) = key.strip_prefix("SCORING_THRESHOLDS_") {
        if rest.is_empty() {
            return None;
        }
        return Some(vec![
            "scoring".to_string(),
            "thresholds".to_string(),
            rest.to_lowercase(),
        ]);
    }
    None
}

/// Interpret an env string as bool, integer, or float before falling back
/// to a plain string. Tier values like `CORE` arrive here as strings.
fn coerce_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Number(serde_yaml::Number::from(f));
    }
    Value::String(trimmed.to_string())
}

fn insert_path(root: &mut Mapping, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    let key = Value::String(head.clone());
    if rest.is_empty() {
        root.insert(key, value);
        return;
    }
    let entry = root
        .entry(key)
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !matches!(entry, Value::Mapping(_)) {
        *entry = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(child) = entry {
        insert_path(child, rest, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_embedded_default_loads_and_validates() {
        let config = ConfigLoader::new()
            .load_with(LoadOptions {
                skip_env: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.version, "1.0.0");
        assert!(config.dimensions.contains_key("burstiness"));
        assert!(config.profiles.contains_key("fast"));
    }

    #[test]
    fn test_deep_merge_recursive_mappings() {
        let base = yaml("a: {x: 1, y: 2}\nb: keep");
        let overlay = yaml("a: {y: 9, z: 3}");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, yaml("a: {x: 1, y: 9, z: 3}\nb: keep"));
        // Inputs are untouched
        assert_eq!(base, yaml("a: {x: 1, y: 2}\nb: keep"));
    }

    #[test]
    fn test_deep_merge_replaces_sequences_wholesale() {
        let base = yaml("items: [1, 2, 3]");
        let overlay = yaml("items: [9]");
        assert_eq!(deep_merge(&base, &overlay), yaml("items: [9]"));
    }

    #[test]
    fn test_deep_merge_scalar_over_mapping() {
        let base = yaml("a: {x: 1}");
        let overlay = yaml("a: flat");
        assert_eq!(deep_merge(&base, &overlay), yaml("a: flat"));
    }

    #[test]
    fn test_empty_yaml_is_empty_mapping() {
        let parsed = parse_yaml("", Path::new("empty.yaml")).unwrap();
        assert_eq!(parsed, Value::Mapping(Mapping::new()));
        let comments = parse_yaml("# nothing here\n", Path::new("c.yaml")).unwrap();
        assert_eq!(comments, Value::Mapping(Mapping::new()));
    }

    #[test]
    fn test_env_key_version() {
        assert_eq!(env_key_to_path("VERSION"), Some(vec!["version".to_string()]));
    }

    #[test]
    fn test_env_key_dimension_with_underscored_name() {
        assert_eq!(
            env_key_to_path("DIMENSIONS_TRANSITION_MARKER_WEIGHT"),
            Some(vec![
                "dimensions".to_string(),
                "transition_marker".to_string(),
                "weight".to_string(),
            ])
        );
        assert_eq!(
            env_key_to_path("DIMENSIONS_VOICE_ENABLED"),
            Some(vec![
                "dimensions".to_string(),
                "voice".to_string(),
                "enabled".to_string(),
            ])
        );
    }

    #[test]
    fn test_env_key_thresholds() {
        assert_eq!(
            env_key_to_path("SCORING_THRESHOLDS_AI_LIKELY"),
            Some(vec![
                "scoring".to_string(),
                "thresholds".to_string(),
                "ai_likely".to_string(),
            ])
        );
    }

    #[test]
    fn test_env_key_unrecognized() {
        assert_eq!(env_key_to_path("SOMETHING_ELSE"), None);
        assert_eq!(env_key_to_path("DIMENSIONS_WEIGHT"), None);
        assert_eq!(env_key_to_path("DIMENSIONS_VOICE_COLOR"), None);
        assert_eq!(env_key_to_path("SCORING_THRESHOLDS_"), None);
    }

    #[test]
    fn test_coerce_scalar_types() {
        assert_eq!(coerce_scalar("true"), Value::Bool(true));
        assert_eq!(coerce_scalar("FALSE"), Value::Bool(false));
        assert_eq!(coerce_scalar("42"), Value::Number(42.into()));
        assert_eq!(
            coerce_scalar("12.5"),
            Value::Number(serde_yaml::Number::from(12.5))
        );
        assert_eq!(coerce_scalar("CORE"), Value::String("CORE".to_string()));
    }

    #[test]
    fn test_env_overlay_builds_nested_fragment() {
        let vars = vec![
            (
                "WRITESCORE_DIMENSIONS_VOICE_WEIGHT".to_string(),
                "20.0".to_string(),
            ),
            ("WRITESCORE_VERSION".to_string(), "2.0.0".to_string()),
            ("WRITESCORE_BOGUS".to_string(), "x".to_string()),
            ("WRITESCORE_LOG".to_string(), "debug".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let overlay = env_overlay(ENV_PREFIX, vars.into_iter());
        let expected = yaml("dimensions: {voice: {weight: 20.0}}\nversion: 2.0.0");
        assert_eq!(overlay, expected);
    }

    #[test]
    fn test_env_layer_overrides_base() {
        let base = yaml("version: \"1.0.0\"\ndimensions: {voice: {weight: 15.0, tier: CORE}}");
        let vars = vec![(
            "WRITESCORE_DIMENSIONS_VOICE_WEIGHT".to_string(),
            "25.0".to_string(),
        )];
        let merged = deep_merge(&base, &env_overlay(ENV_PREFIX, vars.into_iter()));
        let config = WriteScoreConfig::from_value(merged).unwrap();
        assert_eq!(config.dimensions["voice"].weight, 25.0);
        assert_eq!(config.dimensions["voice"].tier, crate::config::DimensionTier::Core);
    }

    #[test]
    fn test_programmatic_overrides_have_highest_priority() {
        let overrides = yaml("dimensions: {voice: {weight: 33.0}}");
        let config = ConfigLoader::new()
            .load_with(LoadOptions {
                overrides: Some(overrides),
                skip_env: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.dimensions["voice"].weight, 33.0);
        // Untouched siblings survive the merge
        assert_eq!(config.dimensions["burstiness"].weight, 12.0);
    }

    #[test]
    fn test_missing_base_file_is_an_error() {
        let err = ConfigLoader::new()
            .with_base_file("/nonexistent/writescore.yaml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseFile(_)));
    }
}
