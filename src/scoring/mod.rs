//! Dual-score aggregation engine

pub mod calculator;
pub mod dual_score;

pub use calculator::{DualScoreCalculator, ScoringError};
pub use dual_score::{DimensionScore, DualScore, ImprovementAction};
