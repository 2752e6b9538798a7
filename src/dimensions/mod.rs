//! Pluggable stylistic analyzers
//!
//! Each dimension lives in its own file and implements the [`Dimension`]
//! trait from `base`. Instances are registered explicitly through
//! [`DimensionRegistry`]; nothing registers itself.

pub mod base;
pub mod burstiness;
pub mod curve;
pub mod energy;
pub mod formatting;
pub mod registry;
pub mod syntactic;

pub use base::{standard_tiers, Dimension, DimensionMetrics, ScoreTier, NEUTRAL_SCORE};
pub use burstiness::BurstinessDimension;
pub use curve::smooth_ratio_score;
pub use energy::EnergyDimension;
pub use formatting::FormattingDimension;
pub use registry::{DimensionRegistry, RegistryError};
pub use syntactic::SyntacticDimension;
