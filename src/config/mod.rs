//! Configuration system
//!
//! Layered configuration for the scoring engine:
//! - `schema`: typed config shapes with field and cross-field validation
//! - `loader`: merges base file < local file < environment < programmatic
//! - `registry`: process-scoped context holding the validated config plus
//!   the transient content-type weight overlay

pub mod loader;
pub mod registry;
pub mod schema;

pub use loader::{ConfigLoader, LoadOptions};
pub use registry::ConfigRegistry;
pub use schema::{
    ContentTypeConfig, ContentTypeWeights, DimensionConfig, DimensionTier, ProfileConfig,
    ScoringConfig, ThresholdRange, WriteScoreConfig,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required config file not found: {0}")]
    MissingBaseFile(PathBuf),

    #[error("Invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The local override file is individually invalid when merged against
    /// the base alone. Carries the file path so operators fix the right
    /// artifact instead of chasing an opaque merged-config error.
    #[error("Partial config validation failed for {path}: {source}")]
    PartialValidation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Config validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),
}

/// A single violated constraint, identified by config field path
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `dimensions.formatting.weight`)
    pub field: String,
    /// Constraint that was violated
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
