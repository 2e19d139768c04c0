//! Answer insight: scoring and brief synthesis over free-text answers.
//!
//! Both the [quality meter](quality) and the [brief synthesizer](brief)
//! classify answers through the single table in [`category`], so they can
//! never disagree on what counts as "a goal" or "a blocker".

pub mod brief;
pub mod category;
pub mod quality;

pub use brief::{DEFAULT_SITUATION, SECTION_HEADINGS, synthesize};
pub use category::{
    Buckets, CLASSIFICATION, Category, CategoryRule, bucket_answers, eligible_answers,
    is_companion_key,
};
pub use quality::{
    DEFAULT_THRESHOLDS, QualityReport, TierTracker, length_bonus, score, thresholds_crossed,
};
