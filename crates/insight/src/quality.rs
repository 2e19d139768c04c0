//! Quality meter: how complete is a set of free-text answers?
//!
//! Score = sum of the weights of the filled categories (85 max) plus a
//! length bonus of up to 15, on a 0–100 scale.

use crate::category::{CLASSIFICATION, Category, bucket_answers, eligible_answers};
use promptloom_core::{FieldValues, filled};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Score tiers that fire a one-time signal when first reached.
pub const DEFAULT_THRESHOLDS: [u32; 3] = [45, 65, 85];

const MAX_LENGTH_BONUS: usize = 15;
const LENGTH_BONUS_SPAN: usize = 140;
/// Below this bonus the answers are considered too short.
const EXPAND_BELOW: u32 = 8;

/// Missing-category suggestions are emitted in this order.
const SUGGESTION_ORDER: [Category; 5] = [
    Category::Situation,
    Category::Goal,
    Category::Blocker,
    Category::Timeframe,
    Category::Tone,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0–100.
    pub score: u32,
    /// `add_<category>` per missing category, then `expand_answers` if short.
    pub suggestions: Vec<String>,
    /// Expected questions that have a non-blank answer.
    pub filled_count: usize,
    /// Number of expected questions.
    pub total_possible: usize,
}

/// `min(15, floor(total_chars / 140 * 15))`.
pub fn length_bonus(total_chars: usize) -> u32 {
    (total_chars * MAX_LENGTH_BONUS / LENGTH_BONUS_SPAN).min(MAX_LENGTH_BONUS) as u32
}

/// Score an answer map against the classification table.
pub fn score(answers: &FieldValues, expected_questions: &[String]) -> QualityReport {
    let buckets = bucket_answers(answers);
    let total_chars: usize = eligible_answers(answers)
        .map(|(_, v)| v.chars().count())
        .sum();

    let weights: u32 = CLASSIFICATION
        .iter()
        .filter(|rule| buckets.is_filled(rule.category))
        .map(|rule| rule.weight)
        .sum();
    let bonus = length_bonus(total_chars);

    let mut suggestions: Vec<String> = SUGGESTION_ORDER
        .iter()
        .filter(|c| !buckets.is_filled(**c))
        .map(|c| c.suggestion().to_string())
        .collect();
    if bonus < EXPAND_BELOW {
        suggestions.push("expand_answers".to_string());
    }

    let filled_count = expected_questions
        .iter()
        .filter(|q| filled(answers, q.as_str()).is_some())
        .count();

    QualityReport {
        score: (weights + bonus).min(100),
        suggestions,
        filled_count,
        total_possible: expected_questions.len(),
    }
}

/// Every threshold `t` with `prev < t <= next`, ascending.
pub fn thresholds_crossed(prev: u32, next: u32, thresholds: &[u32]) -> Vec<u32> {
    let mut crossed: Vec<u32> = thresholds
        .iter()
        .copied()
        .filter(|t| prev < *t && *t <= next)
        .collect();
    crossed.sort_unstable();
    crossed.dedup();
    crossed
}

/// Fires each threshold at most once across a session of score updates.
///
/// Tracks the highest score seen; a dip and recovery never re-fires a tier
/// that was already passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTracker {
    thresholds: Vec<u32>,
    high_water: u32,
}

impl Default for TierTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLDS.to_vec())
    }
}

impl TierTracker {
    pub fn new(thresholds: Vec<u32>) -> Self {
        Self {
            thresholds,
            high_water: 0,
        }
    }

    /// Record a new score and return the tiers reached for the first time.
    pub fn observe(&mut self, score: u32) -> Vec<u32> {
        let crossed = thresholds_crossed(self.high_water, score, &self.thresholds);
        if !crossed.is_empty() {
            debug!(score, tiers = ?crossed, "Quality tiers reached");
        }
        self.high_water = self.high_water.max(score);
        crossed
    }

    pub fn high_water(&self) -> u32 {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn all_categories() -> FieldValues {
        answers(&[
            ("situation", "We run a two-person bakery in a busy neighbourhood."),
            ("goal", "Grow weekday pre-orders."),
            ("challenge", "Foot traffic drops after 2pm."),
            ("tone", "Warm and local."),
            ("timeframe", "Next quarter."),
        ])
    }

    #[test]
    fn empty_answers_score_zero_with_all_suggestions() {
        let report = score(&FieldValues::new(), &[]);
        assert_eq!(report.score, 0);
        assert_eq!(
            report.suggestions,
            vec![
                "add_situation",
                "add_goal",
                "add_blocker",
                "add_timeframe",
                "add_tone",
                "expand_answers"
            ]
        );
        assert_eq!(report.total_possible, 0);
    }

    #[test]
    fn length_bonus_formula() {
        assert_eq!(length_bonus(0), 0);
        assert_eq!(length_bonus(9), 0);
        assert_eq!(length_bonus(10), 1);
        assert_eq!(length_bonus(70), 7);
        assert_eq!(length_bonus(75), 8);
        assert_eq!(length_bonus(140), 15);
        assert_eq!(length_bonus(10_000), 15);
    }

    #[test]
    fn single_market_answer_sits_between_baseline_and_full() {
        let baseline = score(&FieldValues::new(), &[]).score;
        let full = score(&all_categories(), &[]).score;
        let market = score(&answers(&[("market", "Austin, TX")]), &[]).score;
        assert!(baseline < market && market < full, "{baseline} < {market} < {full}");
        assert_eq!(market, 25 + 1);
    }

    #[test]
    fn all_categories_filled() {
        let report = score(&all_categories(), &[]);
        // 132 characters in total: 85 from weights plus a bonus of 14.
        assert_eq!(report.score, 99);
        assert!(report.suggestions.iter().all(|s| !s.starts_with("add_")));
    }

    #[test]
    fn filling_a_missing_category_never_decreases_score() {
        let mut current = answers(&[("market", "Austin, TX")]);
        let mut last = score(&current, &[]).score;
        for (key, value) in [
            ("goal", "More bookings"),
            ("blocker", "No time"),
            ("tone", "Friendly"),
            ("deadline", "June"),
        ] {
            current.insert(key.to_string(), value.to_string());
            let next = score(&current, &[]).score;
            assert!(next >= last, "{key}: {next} < {last}");
            last = next;
        }
    }

    #[test]
    fn unrecognized_keys_only_add_length() {
        let long = "x".repeat(140);
        let report = score(&answers(&[("favourite-colour", long.as_str())]), &[]);
        assert_eq!(report.score, 15);
        assert!(!report.suggestions.contains(&"expand_answers".to_string()));
    }

    #[test]
    fn companion_answers_do_not_count() {
        let notes = "goal ".repeat(40);
        let report = score(&answers(&[("custom-companion", notes.as_str())]), &[]);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn filled_count_tracks_expected_questions() {
        let expected = vec!["situation".to_string(), "goal".to_string(), "tone".to_string()];
        let report = score(&answers(&[("situation", "x"), ("goal", "  ")]), &expected);
        assert_eq!(report.filled_count, 1);
        assert_eq!(report.total_possible, 3);
    }

    #[test]
    fn threshold_crossing_examples() {
        let t = DEFAULT_THRESHOLDS;
        assert_eq!(thresholds_crossed(10, 50, &t), vec![45]);
        assert_eq!(thresholds_crossed(44, 65, &t), vec![45, 65]);
        assert_eq!(thresholds_crossed(85, 86, &t), Vec::<u32>::new());
        assert_eq!(thresholds_crossed(90, 10, &t), Vec::<u32>::new());
        assert_eq!(thresholds_crossed(0, 100, &[85, 45, 65]), vec![45, 65, 85]);
    }

    #[test]
    fn tier_tracker_never_refires() {
        let mut tracker = TierTracker::default();
        assert_eq!(tracker.observe(50), vec![45]);
        assert_eq!(tracker.observe(30), Vec::<u32>::new());
        assert_eq!(tracker.observe(50), Vec::<u32>::new());
        assert_eq!(tracker.observe(90), vec![65, 85]);
        assert_eq!(tracker.high_water(), 90);
    }
}
