//! Formatting dimension: markdown habit analysis
//!
//! Heavy bullet use, decorative bold, and dense em-dashes are habits of
//! generated drafts. This analyzer works on raw lines rather than extracted
//! prose because the markup itself is the signal.

use crate::config::DimensionTier;
use crate::dimensions::base::{Dimension, DimensionMetrics, NEUTRAL_SCORE};
use crate::dimensions::curve::smooth_ratio_score;
use crate::text::{LineKind, LineScanner};

const BADNESS_THRESHOLD_LOW: f64 = 0.20;
const BADNESS_THRESHOLD_HIGH: f64 = 0.75;

pub struct FormattingDimension;

impl FormattingDimension {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FormattingDimension {
    fn default() -> Self {
        Self::new()
    }
}

fn count_occurrences(text: &str, pattern: &str) -> usize {
    text.matches(pattern).count()
}

impl Dimension for FormattingDimension {
    fn name(&self) -> &'static str {
        "formatting"
    }

    fn weight(&self) -> f64 {
        10.0
    }

    fn tier(&self) -> DimensionTier {
        DimensionTier::Core
    }

    fn description(&self) -> &'static str {
        "Markdown formatting habits and uniformity"
    }

    fn analyze(&self, input: &str) -> DimensionMetrics {
        let mut scanner = LineScanner::new();
        let mut content_lines = 0usize;
        let mut bullet_lines = 0usize;
        let mut heading_lines = 0usize;
        let mut word_count = 0usize;
        let mut bold_pairs = 0usize;
        let mut em_dashes = 0usize;

        for line in input.lines() {
            let kind = scanner.classify(line);
            match kind {
                LineKind::Blank | LineKind::Fence | LineKind::Code | LineKind::HtmlComment => {
                    continue
                }
                LineKind::Bullet => bullet_lines += 1,
                LineKind::Heading => heading_lines += 1,
                LineKind::Prose => {}
            }
            content_lines += 1;
            word_count += crate::text::words(line).len();
            bold_pairs += count_occurrences(line, "**") / 2;
            em_dashes += line.chars().filter(|&c| c == '\u{2014}').count();
            em_dashes += count_occurrences(line, " -- ");
        }

        if content_lines == 0 || word_count == 0 {
            return DimensionMetrics::unavailable();
        }

        let per_100 = 100.0 / word_count as f64;
        DimensionMetrics::new()
            .with("content_lines", content_lines)
            .with("word_count", word_count)
            .with("bullet_lines", bullet_lines)
            .with("bullet_ratio", bullet_lines as f64 / content_lines as f64)
            .with("heading_lines", heading_lines)
            .with("heading_ratio", heading_lines as f64 / content_lines as f64)
            .with("bold_pairs", bold_pairs)
            .with("bold_per_100_words", bold_pairs as f64 * per_100)
            .with("em_dash_count", em_dashes)
            .with("em_dash_per_100_words", em_dashes as f64 * per_100)
    }

    fn calculate_score(&self, metrics: &DimensionMetrics) -> f64 {
        if !metrics.available() {
            return NEUTRAL_SCORE;
        }
        let (Some(bullet_ratio), Some(bold), Some(em_dash)) = (
            metrics.get_f64("bullet_ratio"),
            metrics.get_f64("bold_per_100_words"),
            metrics.get_f64("em_dash_per_100_words"),
        ) else {
            return NEUTRAL_SCORE;
        };

        let badness = 0.40 * (bullet_ratio * 1.4).min(1.0)
            + 0.30 * (bold / 4.0).min(1.0)
            + 0.30 * (em_dash / 3.0).min(1.0);
        smooth_ratio_score(badness, BADNESS_THRESHOLD_LOW, BADNESS_THRESHOLD_HIGH)
    }

    fn recommendations(&self, _score: f64, metrics: &DimensionMetrics) -> Vec<String> {
        let mut out = Vec::new();
        if metrics.get_f64("bullet_ratio").unwrap_or(0.0) > 0.4 {
            out.push("Convert bullet walls into connected prose paragraphs".to_string());
        }
        if metrics.get_f64("bold_per_100_words").unwrap_or(0.0) > 2.0 {
            out.push("Cut decorative bold; reserve emphasis for what matters".to_string());
        }
        if metrics.get_f64("em_dash_per_100_words").unwrap_or(0.0) > 1.5 {
            out.push("Replace most em-dashes with commas or periods".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim() -> FormattingDimension {
        FormattingDimension::new()
    }

    const PROSE_DOC: &str = "A plain paragraph of honest prose that simply says what it \
        means.\n\nAnother paragraph follows it, also without any decoration at all, and the \
        document reads smoothly from one thought into the next one.";

    const BULLET_DOC: &str = "# **Key** Takeaways\n\n- **First**: the point\u{2014}stated \
        boldly\n- **Second**: another point\u{2014}also bold\n- **Third**: more of the \
        same\u{2014}again\n- **Fourth**: and again\u{2014}naturally";

    #[test]
    fn test_properties() {
        let d = dim();
        assert_eq!(d.name(), "formatting");
        assert_eq!(d.tier(), DimensionTier::Core);
    }

    #[test]
    fn test_plain_prose_has_clean_metrics() {
        let metrics = dim().analyze(PROSE_DOC);
        assert!(metrics.available());
        assert_eq!(metrics.get_f64("bullet_ratio"), Some(0.0));
        assert_eq!(metrics.get_u64("em_dash_count"), Some(0));
        assert_eq!(metrics.get_u64("bold_pairs"), Some(0));
    }

    #[test]
    fn test_bullet_doc_metrics() {
        let metrics = dim().analyze(BULLET_DOC);
        assert_eq!(metrics.get_u64("bullet_lines"), Some(4));
        assert_eq!(metrics.get_u64("heading_lines"), Some(1));
        assert!(metrics.get_f64("bullet_ratio").unwrap() > 0.7);
        assert_eq!(metrics.get_u64("em_dash_count"), Some(4));
        assert!(metrics.get_u64("bold_pairs").unwrap() >= 5);
    }

    #[test]
    fn test_prose_outscores_bullet_wall() {
        let d = dim();
        let prose = d.calculate_score(&d.analyze(PROSE_DOC));
        let bullets = d.calculate_score(&d.analyze(BULLET_DOC));
        assert!(prose > bullets, "prose {prose} should beat bullets {bullets}");
        assert_eq!(prose, 75.0);
        assert!(bullets < 40.0);
    }

    #[test]
    fn test_code_blocks_ignored() {
        let doc = "Real prose sentence here.\n\n```\n- not a bullet, just code\n** also code\n```";
        let metrics = dim().analyze(doc);
        assert_eq!(metrics.get_u64("bullet_lines"), Some(0));
        assert_eq!(metrics.get_u64("bold_pairs"), Some(0));
    }

    #[test]
    fn test_empty_input_unavailable() {
        let d = dim();
        assert!(!d.analyze("").available());
        assert_eq!(d.calculate_score(&d.analyze("")), 50.0);
    }

    #[test]
    fn test_bullet_wall_recommendation() {
        let d = dim();
        let metrics = d.analyze(BULLET_DOC);
        let recs = d.recommendations(d.calculate_score(&metrics), &metrics);
        assert!(recs.iter().any(|r| r.contains("bullet")));
        assert!(recs.iter().any(|r| r.contains("em-dash")));
    }
}
