//! Energy dimension: writing dynamism and engagement
//!
//! Human prose tends toward active constructions, concrete action verbs,
//! and rhythm contrast between sentences. Generated prose leans on passive
//! voice, static linking verbs, and abstract nouns. Each marker is a ratio
//! folded into one badness score.

use crate::config::DimensionTier;
use crate::dimensions::base::{Dimension, DimensionMetrics, NEUTRAL_SCORE};
use crate::dimensions::curve::smooth_ratio_score;
use crate::text;

/// Matched as word prefixes so inflections count (attacked, racing).
const DYNAMIC_VERB_STEMS: &[&str] = &[
    "attack", "seiz", "smash", "conquer", "explod", "rac", "launch", "transform", "rush",
    "rocket", "surg", "spark", "crush", "strik", "grab", "leap", "charg", "blast", "ignit",
    "accelerat", "boost", "drove", "driv",
];

const STATIC_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "seems", "seem", "appears", "appear",
    "includes", "include", "consists", "consist", "involves", "involve", "contains", "contain",
    "represents", "represent", "constitutes", "exists",
];

const ABSTRACT_STEMS: &[&str] = &[
    "methodolog", "framework", "concept", "implication", "paradigm", "phenomen", "situation",
    "relationship", "approach", "aspect", "factor", "nature", "process", "system",
    "perspective", "context", "notion", "construct",
];

const POWER_WORDS: &[&str] = &[
    "breakthrough", "proven", "remarkable", "essential", "critical", "powerful", "massive",
    "bold", "decisive", "instant", "unstoppable",
];

/// Auxiliaries that can open a passive construction.
const PASSIVE_AUX: &[&str] = &["is", "are", "was", "were", "been", "being", "be", "gets", "got"];

/// Irregular past participles not ending in "ed".
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "written", "drawn", "done", "made", "seen", "taken", "given", "known", "shown", "found",
    "held", "kept", "built", "sent", "left", "put", "set", "brought", "thought", "chosen",
];

pub struct EnergyDimension;

impl EnergyDimension {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnergyDimension {
    fn default() -> Self {
        Self::new()
    }
}

fn is_participle(word: &str) -> bool {
    (word.len() > 3 && word.ends_with("ed")) || IRREGULAR_PARTICIPLES.contains(&word)
}

/// Count aux + participle pairs, allowing one intervening token for
/// progressive passives ("was being considered").
fn passive_count(sentence_words: &[String]) -> usize {
    let mut count = 0;
    for (i, word) in sentence_words.iter().enumerate() {
        if !PASSIVE_AUX.contains(&word.as_str()) {
            continue;
        }
        let window = &sentence_words[i + 1..(i + 3).min(sentence_words.len())];
        if window.iter().any(|w| is_participle(w)) {
            count += 1;
        }
    }
    count
}

/// Mean absolute length difference between adjacent sentences, relative to
/// the mean sentence length. Zero for fewer than two sentences.
fn rhythm_contrast(lengths: &[usize]) -> f64 {
    if lengths.len() < 2 {
        return 0.0;
    }
    let mean: f64 = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }
    let diff_sum: f64 = lengths
        .windows(2)
        .map(|w| (w[0] as f64 - w[1] as f64).abs())
        .sum();
    diff_sum / (lengths.len() - 1) as f64 / mean
}

impl Dimension for EnergyDimension {
    fn name(&self) -> &'static str {
        "energy"
    }

    fn weight(&self) -> f64 {
        5.0
    }

    fn tier(&self) -> DimensionTier {
        DimensionTier::Supporting
    }

    fn description(&self) -> &'static str {
        "Writing dynamism and engagement"
    }

    fn analyze(&self, input: &str) -> DimensionMetrics {
        let prose = text::prose(input);
        let sentences = text::sentences(&prose);
        let all_words = text::words(&prose);
        if sentences.is_empty() || all_words.is_empty() {
            return DimensionMetrics::unavailable();
        }

        let word_count = all_words.len();
        let mut passives = 0;
        let mut lengths = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            let sentence_words = text::words(sentence);
            passives += passive_count(&sentence_words);
            lengths.push(sentence_words.len());
        }

        let dynamic = all_words
            .iter()
            .filter(|w| DYNAMIC_VERB_STEMS.iter().any(|s| w.starts_with(s)))
            .count();
        let static_verbs = all_words
            .iter()
            .filter(|w| STATIC_VERBS.contains(&w.as_str()))
            .count();
        let abstract_words = all_words
            .iter()
            .filter(|w| ABSTRACT_STEMS.iter().any(|s| w.starts_with(s)))
            .count();
        let power = all_words
            .iter()
            .filter(|w| POWER_WORDS.contains(&w.as_str()))
            .count();

        let verb_pool = dynamic + static_verbs;
        let static_ratio = if verb_pool == 0 {
            0.0
        } else {
            static_verbs as f64 / verb_pool as f64
        };

        DimensionMetrics::new()
            .with("sentence_count", sentences.len())
            .with("word_count", word_count)
            .with("passive_count", passives)
            .with("passive_ratio", passives as f64 / sentences.len() as f64)
            .with("dynamic_verb_count", dynamic)
            .with("dynamic_verb_ratio", dynamic as f64 / word_count as f64)
            .with("static_verb_count", static_verbs)
            .with("static_verb_ratio", static_ratio)
            .with("abstract_count", abstract_words)
            .with("abstract_ratio", abstract_words as f64 / word_count as f64)
            .with("power_word_count", power)
            .with("power_word_density", power as f64 / word_count as f64 * 100.0)
            .with("rhythm_contrast", rhythm_contrast(&lengths))
    }

    fn calculate_score(&self, metrics: &DimensionMetrics) -> f64 {
        if !metrics.available() {
            return NEUTRAL_SCORE;
        }
        let (Some(passive), Some(static_ratio), Some(abstract_ratio)) = (
            metrics.get_f64("passive_ratio"),
            metrics.get_f64("static_verb_ratio"),
            metrics.get_f64("abstract_ratio"),
        ) else {
            return NEUTRAL_SCORE;
        };

        let badness = 0.35 * passive.min(1.0)
            + 0.35 * static_ratio
            + 0.30 * (abstract_ratio * 4.0).min(1.0);
        let base = smooth_ratio_score(badness, 0.25, 0.70);

        let dynamic_bonus = (metrics.get_f64("dynamic_verb_ratio").unwrap_or(0.0) * 50.0).min(10.0);
        let rhythm_bonus = (metrics.get_f64("rhythm_contrast").unwrap_or(0.0) * 5.0).min(5.0);
        (base + dynamic_bonus + rhythm_bonus).clamp(0.0, 100.0)
    }

    fn recommendations(&self, _score: f64, metrics: &DimensionMetrics) -> Vec<String> {
        let mut out = Vec::new();
        if metrics.get_f64("passive_ratio").unwrap_or(0.0) > 0.2 {
            out.push("Convert passive constructions to active voice to add drive".to_string());
        }
        if metrics.get_f64("abstract_ratio").unwrap_or(0.0) > 0.05 {
            out.push("Swap abstract nouns for concrete, specific language".to_string());
        }
        if metrics.get_f64("dynamic_verb_ratio").unwrap_or(0.0) < 0.05 {
            out.push("Replace static linking verbs with dynamic action verbs".to_string());
        }
        if metrics.get_u64("sentence_count").unwrap_or(0) > 1
            && metrics.get_f64("rhythm_contrast").unwrap_or(0.0) < 0.3
        {
            out.push("Mix short punchy sentences with longer flowing ones".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIGH_ENERGY: &str = "The team attacked the problem head-on. They seized every \
        opportunity, smashed through obstacles, and conquered each challenge. Ideas exploded \
        in the brainstorming session. Engineers raced to implement solutions. We launched the \
        product. It transformed the market. Customers rushed to sign up. Sales rocketed past \
        projections. The breakthrough was real.";

    const LOW_ENERGY: &str = "The methodology was implemented according to the framework. The \
        system is designed to include various components. The process was being considered by \
        the team. The approach seems to be appropriate. It appears that the concept has \
        implications for the situation. The relationship between the factors was examined. The \
        paradigm is characterized by certain properties. The nature of the phenomenon is being \
        studied.";

    fn dim() -> EnergyDimension {
        EnergyDimension::new()
    }

    #[test]
    fn test_properties() {
        let d = dim();
        assert_eq!(d.name(), "energy");
        assert_eq!(d.weight(), 5.0);
        assert_eq!(d.tier(), DimensionTier::Supporting);
        assert!(d.description().to_lowercase().contains("dynamism"));
    }

    #[test]
    fn test_analyze_reports_required_metrics() {
        let metrics = dim().analyze(HIGH_ENERGY);
        assert!(metrics.available());
        for key in [
            "passive_ratio",
            "dynamic_verb_ratio",
            "abstract_ratio",
            "power_word_density",
            "rhythm_contrast",
        ] {
            assert!(metrics.get_f64(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_passive_ratio_separates_fixtures() {
        let d = dim();
        let high = d.analyze(HIGH_ENERGY);
        let low = d.analyze(LOW_ENERGY);
        assert!(high.get_f64("passive_ratio").unwrap() < 0.3);
        assert!(low.get_f64("passive_ratio").unwrap() > 0.2);
    }

    #[test]
    fn test_dynamic_verbs_in_high_energy_text() {
        let metrics = dim().analyze(HIGH_ENERGY);
        assert!(metrics.get_u64("dynamic_verb_count").unwrap() > 0);
        assert!(metrics.get_f64("dynamic_verb_ratio").unwrap() > 0.05);
    }

    #[test]
    fn test_low_energy_text_is_static_and_abstract() {
        let metrics = dim().analyze(LOW_ENERGY);
        assert!(metrics.get_f64("static_verb_ratio").unwrap() > 0.3);
        assert!(metrics.get_u64("abstract_count").unwrap() > 0);
        assert!(metrics.get_f64("abstract_ratio").unwrap() > 0.02);
    }

    #[test]
    fn test_high_energy_scores_higher() {
        let d = dim();
        let high = d.calculate_score(&d.analyze(HIGH_ENERGY));
        let low = d.calculate_score(&d.analyze(LOW_ENERGY));
        assert!((0.0..=100.0).contains(&high));
        assert!(high > low, "high {high} should beat low {low}");
    }

    #[test]
    fn test_unavailable_is_neutral() {
        let d = dim();
        assert_eq!(d.calculate_score(&DimensionMetrics::unavailable()), 50.0);
        assert!(!d.analyze("").available());
    }

    #[test]
    fn test_low_energy_recommendations() {
        let d = dim();
        let metrics = d.analyze(LOW_ENERGY);
        let score = d.calculate_score(&metrics);
        let recs = d.recommendations(score, &metrics);
        assert!(!recs.is_empty());
        assert!(recs.iter().any(|r| r.to_lowercase().contains("passive")));
        assert!(recs.iter().any(|r| r.to_lowercase().contains("abstract")));
    }

    #[test]
    fn test_rhythm_contrast_rewards_variation() {
        let d = dim();
        let varied = d.analyze(
            "Short. This is a much longer sentence with many more words. Tiny. Another very long sentence here.",
        );
        let uniform = d.analyze("This is normal. That is normal. Here is normal. There is normal.");
        assert!(
            varied.get_f64("rhythm_contrast").unwrap() > uniform.get_f64("rhythm_contrast").unwrap()
        );
    }

    #[test]
    fn test_single_sentence_has_zero_contrast() {
        let metrics = dim().analyze("This is just one sentence.");
        assert_eq!(metrics.get_f64("rhythm_contrast"), Some(0.0));
    }

    #[test]
    fn test_tier_ladder_is_complete() {
        let tiers = dim().tiers();
        let labels: Vec<&str> = tiers.iter().map(|t| t.label).collect();
        for label in ["excellent", "good", "acceptable", "poor"] {
            assert!(labels.contains(&label));
        }
        for tier in &tiers {
            assert!(tier.range.min_value >= 0.0);
            assert!(tier.range.max_value <= 100.0);
            assert!(tier.range.min_value < tier.range.max_value);
        }
    }
}
