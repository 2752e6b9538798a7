//! Burstiness dimension: sentence length variation
//!
//! Human writing alternates short and long sentences; generated text keeps
//! them near one length. The coefficient of variation of sentence word
//! counts is folded into a uniformity ratio and scored on the shared curve.

use crate::config::DimensionTier;
use crate::dimensions::base::{Dimension, DimensionMetrics, NEUTRAL_SCORE};
use crate::dimensions::curve::smooth_ratio_score;
use crate::text;

/// Uniformity at or below this reads as naturally varied.
const UNIFORMITY_THRESHOLD_LOW: f64 = 0.35;

/// Uniformity at or above this reads as machine-steady.
const UNIFORMITY_THRESHOLD_HIGH: f64 = 0.80;

pub struct BurstinessDimension;

impl BurstinessDimension {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BurstinessDimension {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: &[usize]) -> f64 {
    values.iter().sum::<usize>() as f64 / values.len() as f64
}

fn stddev(values: &[usize], mean: f64) -> f64 {
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

impl Dimension for BurstinessDimension {
    fn name(&self) -> &'static str {
        "burstiness"
    }

    fn weight(&self) -> f64 {
        12.0
    }

    fn tier(&self) -> DimensionTier {
        DimensionTier::Core
    }

    fn description(&self) -> &'static str {
        "Sentence length variation and rhythm"
    }

    fn analyze(&self, input: &str) -> DimensionMetrics {
        let prose = text::prose(input);
        let lengths: Vec<usize> = text::sentence_lengths(&prose)
            .into_iter()
            .filter(|&l| l > 0)
            .collect();
        // One sentence has no variation to measure
        if lengths.len() < 2 {
            return DimensionMetrics::unavailable();
        }

        let mean = mean(&lengths);
        let stddev = stddev(&lengths, mean);
        let cv = if mean > 0.0 { stddev / mean } else { 0.0 };

        DimensionMetrics::new()
            .with("sentence_count", lengths.len())
            .with("mean_sentence_words", mean)
            .with("stddev_sentence_words", stddev)
            .with("burstiness_cv", cv)
            .with("uniformity", (1.0 - cv).clamp(0.0, 1.0))
    }

    fn calculate_score(&self, metrics: &DimensionMetrics) -> f64 {
        if !metrics.available() {
            return NEUTRAL_SCORE;
        }
        let Some(uniformity) = metrics.get_f64("uniformity") else {
            return NEUTRAL_SCORE;
        };
        smooth_ratio_score(uniformity, UNIFORMITY_THRESHOLD_LOW, UNIFORMITY_THRESHOLD_HIGH)
    }

    fn recommendations(&self, _score: f64, metrics: &DimensionMetrics) -> Vec<String> {
        let mut out = Vec::new();
        if metrics.get_f64("burstiness_cv").unwrap_or(1.0) < 0.3 {
            out.push(
                "Vary sentence length; follow a long sentence with a short one".to_string(),
            );
        }
        if metrics.get_f64("mean_sentence_words").unwrap_or(0.0) > 25.0 {
            out.push("Break up consistently long sentences".to_string());
        }
        out
    }
}
