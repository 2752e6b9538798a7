//! WriteScore core library
//!
//! Layered configuration, pluggable stylistic dimensions, and the
//! dual-score aggregation that folds dimension scores into an
//! AI-likelihood index and a quality index.

pub mod cli;
pub mod config;
pub mod dimensions;
pub mod scoring;
pub mod text;

pub use config::{ConfigError, ConfigLoader, ConfigRegistry, LoadOptions, WriteScoreConfig};
pub use dimensions::{Dimension, DimensionMetrics, DimensionRegistry};
pub use scoring::{DualScore, DualScoreCalculator, ScoringError};
