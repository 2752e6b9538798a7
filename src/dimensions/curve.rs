//! Shared ratio-to-score transform
//!
//! Dimensions measure "badness" ratios in `[0, 1]` (repetition rate, passive
//! density, uniformity). This module maps a ratio to a 0-100 score through
//! one S-curve so every dimension saturates and decays the same way.

/// Score for ratios at or below `threshold_low`.
pub const SCORE_CAP_LOW: f64 = 75.0;

/// Score at `threshold_high`.
pub const SCORE_CAP_HIGH: f64 = 25.0;

/// Score as the ratio approaches 1.0.
pub const SCORE_FLOOR: f64 = 10.0;

/// Map a badness ratio to a score.
///
/// - at or below `threshold_low`: capped at 75
/// - between the thresholds: smoothstep descent from 75 to 25, exactly 50
///   at the midpoint
/// - above `threshold_high`: linear decay from 25 toward 10 at ratio 1.0
///
/// Non-increasing everywhere: a smaller ratio never scores lower than a
/// larger one.
pub fn smooth_ratio_score(ratio: f64, threshold_low: f64, threshold_high: f64) -> f64 {
    let ratio = ratio.clamp(0.0, 1.0);
    if ratio <= threshold_low {
        return SCORE_CAP_LOW;
    }
    if ratio >= threshold_high {
        if threshold_high >= 1.0 {
            return SCORE_CAP_HIGH;
        }
        let t = (ratio - threshold_high) / (1.0 - threshold_high);
        return SCORE_CAP_HIGH - t * (SCORE_CAP_HIGH - SCORE_FLOOR);
    }
    let t = (ratio - threshold_low) / (threshold_high - threshold_low);
    let s = t * t * (3.0 - 2.0 * t);
    SCORE_CAP_LOW - s * (SCORE_CAP_LOW - SCORE_CAP_HIGH)
}
