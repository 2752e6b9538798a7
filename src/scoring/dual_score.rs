//! Composite score report types
//!
//! The output surface handed to formatters and history tracking. Everything
//! is plain data and serializable; rendering is someone else's job.

use serde::Serialize;

use crate::config::DimensionTier;

/// One dimension's contribution to the composites.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionScore {
    pub name: String,
    /// 0-100, higher reads more human
    pub score: f64,
    /// Content-type-adjusted weight actually used in the AI composite.
    /// Zero when the dimension could not measure the input.
    pub weight: f64,
    pub tier: DimensionTier,
    pub available: bool,
}

/// A concrete suggestion attached to a low-scoring dimension.
#[derive(Debug, Clone, Serialize)]
pub struct ImprovementAction {
    pub dimension: String,
    pub score: f64,
    pub tier: DimensionTier,
    pub suggestion: String,
}

/// Full result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct DualScore {
    /// AI-likelihood index: 100 reads fully human, 0 fully generated
    pub ai_likelihood: f64,
    pub ai_label: String,
    /// Overall writing quality index
    pub quality: f64,
    pub quality_label: String,
    /// Per-dimension breakdown in evaluation order
    pub dimensions: Vec<DimensionScore>,
    /// Worst dimensions first
    pub actions: Vec<ImprovementAction>,
}
