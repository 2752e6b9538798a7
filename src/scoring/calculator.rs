//! Dual-score aggregation
//!
//! Runs the configured dimensions over a text and folds their scores into
//! two composites: an AI-likelihood index weighted by the content-type
//! adjusted dimension weights, and a quality index weighted either by the
//! active content type's composite vector or by tier membership.
//!
//! A dimension that cannot measure the input shows up in the breakdown at
//! the neutral score but with zero weight, so it is excluded from every
//! denominator rather than dragging composites toward 50.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigRegistry, DimensionTier};
use crate::dimensions::{DimensionRegistry, NEUTRAL_SCORE};

use super::dual_score::{DimensionScore, DualScore, ImprovementAction};

/// Dimensions below this score contribute improvement actions when no
/// configured cutoff exists.
const DEFAULT_NEEDS_IMPROVEMENT: f64 = 60.0;

/// Suggestions taken per low-scoring dimension.
const ACTIONS_PER_DIMENSION: usize = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
}

pub struct DualScoreCalculator<'a> {
    config: &'a ConfigRegistry,
    dimensions: &'a DimensionRegistry,
}

struct Evaluation {
    name: String,
    score: f64,
    weight: f64,
    tier: DimensionTier,
    available: bool,
    suggestions: Vec<String>,
}

impl<'a> DualScoreCalculator<'a> {
    pub fn new(config: &'a ConfigRegistry, dimensions: &'a DimensionRegistry) -> Self {
        Self { config, dimensions }
    }

    /// Score `text`, optionally restricting to a named profile's dimensions.
    pub fn analyze(&self, text: &str, profile: Option<&str>) -> Result<DualScore, ScoringError> {
        let names: Vec<String> = match profile {
            Some(name) => self
                .config
                .profile_dimensions(name)
                .ok_or_else(|| ScoringError::UnknownProfile(name.to_string()))?
                .to_vec(),
            None => self
                .config
                .enabled_dimensions()
                .into_iter()
                .map(String::from)
                .collect(),
        };

        let mut evaluations = Vec::new();
        for name in names {
            let enabled = self
                .config
                .config()
                .dimensions
                .get(&name)
                .map(|d| d.enabled)
                .unwrap_or(false);
            if !enabled {
                continue;
            }
            let Some(dimension) = self.dimensions.get(&name) else {
                debug!(dimension = %name, "no analyzer registered, skipping");
                continue;
            };
            let metrics = dimension.analyze(text);
            let available = metrics.available();
            let score = if available {
                dimension.calculate_score(&metrics)
            } else {
                NEUTRAL_SCORE
            };
            let weight = if available {
                self.config.dimension_weight_or(&name, dimension.weight())
            } else {
                0.0
            };
            let suggestions = if available {
                dimension.recommendations(score, &metrics)
            } else {
                Vec::new()
            };
            evaluations.push(Evaluation {
                name,
                score,
                weight,
                tier: dimension.tier(),
                available,
                suggestions,
            });
        }

        let ai_likelihood = weighted_mean(evaluations.iter().map(|e| (e.score, e.weight)));
        let quality = self.quality_index(&evaluations);
        let ai_label = self.label("ai_detection", ai_likelihood);
        let quality_label = self.label("quality", quality);
        let actions = self.improvement_actions(&evaluations);

        info!(
            ai = format!("{ai_likelihood:.1}"),
            quality = format!("{quality:.1}"),
            dimensions = evaluations.len(),
            "analysis complete"
        );

        Ok(DualScore {
            ai_likelihood,
            ai_label,
            quality,
            quality_label,
            dimensions: evaluations
                .into_iter()
                .map(|e| DimensionScore {
                    name: e.name,
                    score: e.score,
                    weight: e.weight,
                    tier: e.tier,
                    available: e.available,
                })
                .collect(),
            actions,
        })
    }

    /// Quality weights come from the active content type's composite vector
    /// when one is set; dimensions absent from that vector get zero weight.
    /// Without a vector, Core and Supporting dimensions count at their
    /// effective weights and Experimental ones are left out.
    fn quality_index(&self, evaluations: &[Evaluation]) -> f64 {
        let composite = self
            .config
            .content_type()
            .and_then(|ct| self.config.content_type_config(ct))
            .map(|ct| &ct.composite_weights)
            .filter(|w| !w.is_unset());

        match composite {
            Some(weights) => {
                let pairs = weights.as_pairs();
                weighted_mean(evaluations.iter().filter(|e| e.available).map(|e| {
                    let w = pairs
                        .iter()
                        .find(|(name, _)| *name == e.name)
                        .map(|(_, w)| *w)
                        .unwrap_or(0.0);
                    (e.score, w)
                }))
            }
            None => weighted_mean(
                evaluations
                    .iter()
                    .filter(|e| e.tier != DimensionTier::Experimental)
                    .map(|e| (e.score, e.weight)),
            ),
        }
    }

    fn label(&self, category: &str, score: f64) -> String {
        self.config
            .categorize(category, score)
            .unwrap_or("unknown")
            .to_string()
    }

    fn improvement_actions(&self, evaluations: &[Evaluation]) -> Vec<ImprovementAction> {
        let cutoff = self
            .config
            .threshold_f64("needs_improvement", DEFAULT_NEEDS_IMPROVEMENT);

        let mut low: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|e| e.available && e.score < cutoff && !e.suggestions.is_empty())
            .collect();
        // Worst first, tier rank breaks ties
        low.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(a.tier.rank().cmp(&b.tier.rank()))
        });

        low.iter()
            .flat_map(|e| {
                e.suggestions
                    .iter()
                    .take(ACTIONS_PER_DIMENSION)
                    .map(|suggestion| ImprovementAction {
                        dimension: e.name.clone(),
                        score: e.score,
                        tier: e.tier,
                        suggestion: suggestion.clone(),
                    })
            })
            .collect()
    }
}

/// Weighted mean normalized by the included weights; neutral when nothing
/// carries weight.
fn weighted_mean(pairs: impl Iterator<Item = (f64, f64)>) -> f64 {
    let (sum, weight_sum) = pairs.fold((0.0, 0.0), |(s, w), (score, weight)| {
        (s + score * weight, w + weight)
    });
    if weight_sum > 0.0 {
        sum / weight_sum
    } else {
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, LoadOptions};

    const HUMAN_DOC: &str = "No. That was not how the launch went at all, whatever the press \
        release claimed afterward. We attacked the rollout in stages because the first attempt, \
        which collapsed under load on a Tuesday, taught us more than any planning document ever \
        had. Short version: we shipped late. The team seized the extra week, crushed the \
        backlog, and transformed a fragile deploy into something we finally trusted. When the \
        dust settled, customers rushed in anyway.";

    const GENERATED_DOC: &str = "# **Key** Benefits\n\n- **Scalability**: the system is \
        scalable\u{2014}highly scalable\n- **Reliability**: the system is reliable\u{2014}very \
        reliable\n- **Efficiency**: the system is efficient\u{2014}truly efficient\n- \
        **Flexibility**: the system is flexible\u{2014}remarkably flexible\n\nThe system is \
        effective. It provides value. The approach works well. The method is useful. The \
        framework is robust. The process is being considered. The methodology was implemented.";

    fn config() -> ConfigRegistry {
        let options = LoadOptions {
            skip_env: true,
            ..Default::default()
        };
        ConfigRegistry::from_loader(&ConfigLoader::new(), options).unwrap()
    }

    fn dims() -> DimensionRegistry {
        DimensionRegistry::with_builtins()
    }

    #[test]
    fn test_full_run_scores_in_range() {
        let config = config();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze(HUMAN_DOC, None)
            .unwrap();
        assert!((0.0..=100.0).contains(&result.ai_likelihood));
        assert!((0.0..=100.0).contains(&result.quality));
        // Only the registered analyzers appear in the breakdown
        assert_eq!(result.dimensions.len(), 4);
        assert!(!result.ai_label.is_empty());
    }

    #[test]
    fn test_human_doc_outscores_generated_doc() {
        let config = config();
        let dims = dims();
        let calculator = DualScoreCalculator::new(&config, &dims);
        let human = calculator.analyze(HUMAN_DOC, None).unwrap();
        let generated = calculator.analyze(GENERATED_DOC, None).unwrap();
        assert!(
            human.ai_likelihood > generated.ai_likelihood,
            "human {} vs generated {}",
            human.ai_likelihood,
            generated.ai_likelihood
        );
    }

    #[test]
    fn test_profile_restricts_dimensions() {
        let config = config();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze(HUMAN_DOC, Some("fast"))
            .unwrap();
        let names: Vec<&str> = result.dimensions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["formatting", "burstiness", "syntactic"]);
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let config = config();
        let dims = dims();
        let err = DualScoreCalculator::new(&config, &dims)
            .analyze(HUMAN_DOC, Some("warp"))
            .unwrap_err();
        assert_eq!(err, ScoringError::UnknownProfile("warp".to_string()));
    }

    #[test]
    fn test_unavailable_dimension_excluded_from_denominator() {
        let config = config();
        let dims = dims();
        // A single sentence: burstiness cannot measure variation
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze("Only one sentence lives here.", None)
            .unwrap();
        let burstiness = result
            .dimensions
            .iter()
            .find(|d| d.name == "burstiness")
            .unwrap();
        assert!(!burstiness.available);
        assert_eq!(burstiness.weight, 0.0);
        assert_eq!(burstiness.score, NEUTRAL_SCORE);
    }

    #[test]
    fn test_empty_text_is_fully_neutral() {
        let config = config();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze("", None)
            .unwrap();
        assert_eq!(result.ai_likelihood, NEUTRAL_SCORE);
        assert_eq!(result.quality, NEUTRAL_SCORE);
        assert!(result.actions.is_empty());
    }

    #[test]
    fn test_content_type_adjusts_breakdown_weight() {
        let mut config = config();
        config.set_content_type("technical").unwrap();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze(HUMAN_DOC, None)
            .unwrap();
        let formatting = result
            .dimensions
            .iter()
            .find(|d| d.name == "formatting")
            .unwrap();
        assert!(formatting.available);
        assert!((formatting.weight - 11.5).abs() < 1e-9); // 10.0 * 1.15
    }

    #[test]
    fn test_actions_sorted_worst_first() {
        let config = config();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze(GENERATED_DOC, None)
            .unwrap();
        assert!(!result.actions.is_empty());
        for pair in result.actions.windows(2) {
            assert!(pair[0].score <= pair[1].score);
        }
        let cutoff = config.threshold_f64("needs_improvement", 60.0);
        assert!(result.actions.iter().all(|a| a.score < cutoff));
    }

    #[test]
    fn test_labels_come_from_category_ladders() {
        let config = config();
        let dims = dims();
        let result = DualScoreCalculator::new(&config, &dims)
            .analyze("", None)
            .unwrap();
        // Neutral 50 falls in the configured uncertain/fair bands
        assert_eq!(result.ai_label, "uncertain");
        assert_eq!(result.quality_label, "fair");
    }
}
