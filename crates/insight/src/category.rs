//! Shared answer classification table.
//!
//! An answer key belongs to a category when its lowercased form contains
//! any of the category's patterns. A key may match several categories or
//! none; unmatched keys still count towards the length bonus.

use promptloom_core::FieldValues;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Situation,
    Goal,
    Blocker,
    Tone,
    Timeframe,
}

impl Category {
    /// Suggestion tag emitted when no answer fills this category.
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::Situation => "add_situation",
            Self::Goal => "add_goal",
            Self::Blocker => "add_blocker",
            Self::Tone => "add_tone",
            Self::Timeframe => "add_timeframe",
        }
    }

    pub fn rule(self) -> &'static CategoryRule {
        // CLASSIFICATION holds exactly one rule per category, in enum order.
        &CLASSIFICATION[self as usize]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Situation => write!(f, "situation"),
            Self::Goal => write!(f, "goal"),
            Self::Blocker => write!(f, "blocker"),
            Self::Tone => write!(f, "tone"),
            Self::Timeframe => write!(f, "timeframe"),
        }
    }
}

/// One row of the classification table.
#[derive(Debug)]
pub struct CategoryRule {
    pub category: Category,
    /// Substrings matched against the lowercased answer key.
    pub patterns: &'static [&'static str],
    /// Score contribution when the category is filled.
    pub weight: u32,
}

impl CategoryRule {
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.patterns.iter().any(|p| key.contains(p))
    }
}

pub static CLASSIFICATION: [CategoryRule; 5] = [
    CategoryRule {
        category: Category::Situation,
        patterns: &[
            "situation",
            "context",
            "background",
            "current",
            "market",
            "business",
            "industry",
        ],
        weight: 25,
    },
    CategoryRule {
        category: Category::Goal,
        patterns: &["goal", "objective", "outcome", "achieve", "success", "aim"],
        weight: 20,
    },
    CategoryRule {
        category: Category::Blocker,
        patterns: &[
            "blocker",
            "challenge",
            "obstacle",
            "problem",
            "struggle",
            "pain",
            "constraint",
        ],
        weight: 20,
    },
    CategoryRule {
        category: Category::Tone,
        patterns: &["tone", "voice", "style"],
        weight: 10,
    },
    CategoryRule {
        category: Category::Timeframe,
        patterns: &["timeframe", "timeline", "deadline", "urgency", "horizon", "when"],
        weight: 10,
    },
];

/// Wizard companion answers (`custom-companion…` keys) are free-form notes
/// and never classified.
pub fn is_companion_key(key: &str) -> bool {
    key.to_lowercase().contains("custom-companion")
}

/// Answers eligible for classification: non-companion keys with non-blank
/// values, in key order, values trimmed.
pub fn eligible_answers(answers: &FieldValues) -> impl Iterator<Item = (&str, &str)> {
    answers
        .iter()
        .filter(|(k, _)| !is_companion_key(k))
        .map(|(k, v)| (k.as_str(), v.trim()))
        .filter(|(_, v)| !v.is_empty())
}

/// Answer values grouped by category, each in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub situation: Vec<String>,
    pub goal: Vec<String>,
    pub blocker: Vec<String>,
    pub tone: Vec<String>,
    pub timeframe: Vec<String>,
}

impl Buckets {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Situation => &self.situation,
            Category::Goal => &self.goal,
            Category::Blocker => &self.blocker,
            Category::Tone => &self.tone,
            Category::Timeframe => &self.timeframe,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Situation => &mut self.situation,
            Category::Goal => &mut self.goal,
            Category::Blocker => &mut self.blocker,
            Category::Tone => &mut self.tone,
            Category::Timeframe => &mut self.timeframe,
        }
    }

    pub fn is_filled(&self, category: Category) -> bool {
        !self.get(category).is_empty()
    }

    /// Bucket values joined with `"; "`, or `None` when the bucket is empty.
    pub fn joined(&self, category: Category) -> Option<String> {
        let values = self.get(category);
        (!values.is_empty()).then(|| values.join("; "))
    }
}

/// Classify every eligible answer into the buckets whose patterns match.
pub fn bucket_answers(answers: &FieldValues) -> Buckets {
    let mut buckets = Buckets::default();
    for (key, value) in eligible_answers(answers) {
        for rule in &CLASSIFICATION {
            if rule.matches(key) {
                buckets.get_mut(rule.category).push(value.to_string());
            }
        }
    }
    buckets
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

    #[test]
    fn table_is_in_enum_order_and_weights_sum_to_85() {
        for (i, rule) in CLASSIFICATION.iter().enumerate() {
            assert_eq!(rule.category as usize, i);
            assert_eq!(rule.category.rule().weight, rule.weight);
        }
        let total: u32 = CLASSIFICATION.iter().map(|r| r.weight).sum();
        assert_eq!(total, 85);
    }

    #[test]
    fn keys_match_case_insensitively() {
        assert!(Category::Goal.rule().matches("Primary-GOAL"));
        assert!(Category::Situation.rule().matches("market"));
        assert!(Category::Timeframe.rule().matches("launch_deadline"));
        assert!(!Category::Tone.rule().matches("budget"));
    }

    #[test]
    fn a_key_can_fill_several_buckets() {
        let buckets = bucket_answers(&answers(&[("goal-and-challenge", "grow; hiring")]));
        assert_eq!(buckets.goal, vec!["grow; hiring"]);
        assert_eq!(buckets.blocker, vec!["grow; hiring"]);
        assert!(buckets.situation.is_empty());
    }

    #[test]
    fn companion_and_blank_answers_are_ignored() {
        let buckets = bucket_answers(&answers(&[
            ("custom-companion-goal", "ignored"),
            ("goal", "   "),
            ("objective", " Double revenue "),
        ]));
        assert_eq!(buckets.goal, vec!["Double revenue"]);
        assert!(is_companion_key("Custom-Companion-Notes"));
    }

    #[test]
    fn joined_uses_semicolons() {
        let buckets = bucket_answers(&answers(&[("goal", "A"), ("objective", "B")]));
        assert_eq!(buckets.joined(Category::Goal).as_deref(), Some("A; B"));
        assert_eq!(buckets.joined(Category::Tone), None);
    }
}
