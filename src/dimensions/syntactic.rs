//! Syntactic dimension: sentence template variety
//!
//! Generated text reuses a small set of sentence openers and clause shapes;
//! human text varies them. Sentences are reduced to opener templates
//! (function words kept, content words collapsed) and the repetition rate of
//! those templates drives the score through the shared S-curve:
//! 0.30 and below caps at 75, 0.70 and above reads as generated.

use std::collections::HashSet;

use crate::config::DimensionTier;
use crate::dimensions::base::{Dimension, DimensionMetrics, NEUTRAL_SCORE};
use crate::dimensions::curve::smooth_ratio_score;
use crate::text;

/// Repetition at or below this is a solid human baseline.
pub const REPETITION_THRESHOLD_LOW: f64 = 0.30;

/// Repetition at or above this is generated-text territory.
pub const REPETITION_THRESHOLD_HIGH: f64 = 0.70;

/// Words kept verbatim in opener templates.
const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "its", "we", "our", "they",
    "their", "he", "she", "you", "i", "is", "are", "was", "were", "be", "been", "being", "has",
    "have", "had", "will", "would", "can", "could", "should", "may", "might", "of", "in", "on",
    "at", "to", "for", "with", "by", "from", "and", "but", "or", "so", "as", "if", "when",
    "while", "although", "because", "since", "after", "before", "there", "here", "not",
];

const SUBORDINATORS: &[&str] = &[
    "when", "although", "while", "because", "which", "that", "who", "whose", "since", "unless",
    "whereas", "if", "though", "until", "after", "before",
];

pub struct SyntacticDimension;

impl SyntacticDimension {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SyntacticDimension {
    fn default() -> Self {
        Self::new()
    }
}

/// Opener signature: the first two tokens with content words collapsed to a
/// placeholder, so "The system is" and "The method is" share a template.
fn template(sentence_words: &[String]) -> String {
    let mut parts = Vec::with_capacity(2);
    for word in sentence_words.iter().take(2) {
        if FUNCTION_WORDS.contains(&word.as_str()) {
            parts.push(word.as_str());
        } else {
            parts.push("*");
        }
    }
    parts.join(" ")
}

impl Dimension for SyntacticDimension {
    fn name(&self) -> &'static str {
        "syntactic"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn tier(&self) -> DimensionTier {
        DimensionTier::Supporting
    }

    fn description(&self) -> &'static str {
        "Syntactic variety across sentence templates"
    }

    fn analyze(&self, input: &str) -> DimensionMetrics {
        let prose = text::prose(input);
        let sentences = text::sentences(&prose);
        if sentences.is_empty() {
            return DimensionMetrics::unavailable();
        }

        let mut templates = Vec::with_capacity(sentences.len());
        let mut subordinated = 0usize;
        let mut total_words = 0usize;
        for sentence in &sentences {
            let sentence_words = text::words(sentence);
            if sentence_words.is_empty() {
                continue;
            }
            if sentence_words
                .iter()
                .any(|w| SUBORDINATORS.contains(&w.as_str()))
            {
                subordinated += 1;
            }
            total_words += sentence_words.len();
            templates.push(template(&sentence_words));
        }
        if templates.is_empty() {
            return DimensionMetrics::unavailable();
        }

        let unique: HashSet<&str> = templates.iter().map(String::as_str).collect();
        let repetition = 1.0 - unique.len() as f64 / templates.len() as f64;

        DimensionMetrics::new()
            .with("syntactic_repetition_score", repetition)
            .with("template_count", templates.len())
            .with("unique_templates", unique.len())
            .with(
                "subordination_index",
                subordinated as f64 / templates.len() as f64,
            )
            .with("avg_sentence_words", total_words as f64 / templates.len() as f64)
    }

    fn calculate_score(&self, metrics: &DimensionMetrics) -> f64 {
        if !metrics.available() {
            return NEUTRAL_SCORE;
        }
        // Missing repetition reads as the neutral midpoint
        let repetition = metrics
            .get_f64("syntactic_repetition_score")
            .unwrap_or(0.5);
        smooth_ratio_score(
            repetition,
            REPETITION_THRESHOLD_LOW,
            REPETITION_THRESHOLD_HIGH,
        )
    }

    fn recommendations(&self, _score: f64, metrics: &DimensionMetrics) -> Vec<String> {
        let mut out = Vec::new();
        if metrics.get_f64("syntactic_repetition_score").unwrap_or(0.0) > 0.5 {
            out.push(
                "Vary sentence openings; consecutive sentences reuse the same template"
                    .to_string(),
            );
        }
        if metrics.get_f64("subordination_index").unwrap_or(1.0) < 0.15 {
            out.push("Add subordinate clauses to connect related ideas".to_string());
        }
        if metrics.get_f64("avg_sentence_words").unwrap_or(f64::MAX) < 8.0 {
            out.push("Combine choppy sentences into longer compound ones".to_string());
        }
        out
    }
}
