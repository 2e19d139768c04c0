//! Structured brief synthesizer.
//!
//! Turns a categorized answer set into a fixed-section scaffold appended to
//! the base prompt text. The synthesizer writes headings and hint lines for
//! a downstream generator to expand; it never writes prose of its own.
//!
//! The output is plain text: no markdown emphasis and no code fences, even
//! when the caller's answers contain them.

use crate::category::{Category, bucket_answers};
use promptloom_core::FieldValues;

/// Used when no answer falls in the situation category.
pub const DEFAULT_SITUATION: &str =
    "The user is working through this challenge and has not described their current situation yet.";

/// The six mandated sections, in output order.
pub const SECTION_HEADINGS: [&str; 6] = [
    "Situation Snapshot",
    "Objectives",
    "Constraints & Challenges",
    "Recommended Strategy",
    "Immediate Action Steps",
    "Refinement Cues",
];

const NOT_SPECIFIED: &str = "not specified";

/// Strip markdown emphasis markers and code fences from caller text.
///
/// Every `*` goes; underscores only in runs of two or more, so snake_case
/// words survive. Removing one marker can join the pieces of another, so
/// passes repeat until the text stops changing.
fn scrub(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let next = out.replace("```", "").replace('*', "").replace("__", "");
        if next == out {
            break;
        }
        out = next;
    }
    out.trim().to_string()
}

/// `"launch-date_target"` → `"Launch date target"`.
fn humanize(key: &str) -> String {
    let spaced: String = key
        .trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let words: Vec<&str> = spaced.split_whitespace().collect();
    let joined = words.join(" ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the brief: base text, challenge, answer listing, six sections.
pub fn synthesize(base_text: &str, challenge_key: &str, answers: &FieldValues) -> String {
    let buckets = bucket_answers(answers);
    let situation = buckets
        .joined(Category::Situation)
        .map(|s| scrub(&s))
        .unwrap_or_else(|| DEFAULT_SITUATION.to_string());
    let hint = |category: Category| {
        buckets
            .joined(category)
            .map(|s| scrub(&s))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    };
    let goals = hint(Category::Goal);
    let blockers = hint(Category::Blocker);
    let tone = hint(Category::Tone);
    let timeframe = hint(Category::Timeframe);

    let mut lines: Vec<String> = Vec::new();
    let base = scrub(base_text);
    if !base.is_empty() {
        lines.push(base);
        lines.push(String::new());
    }

    let challenge = humanize(challenge_key);
    if !challenge.is_empty() {
        lines.push(format!("Challenge: {}", scrub(&challenge)));
        lines.push(String::new());
    }

    lines.push("Answers provided:".to_string());
    let mut listed = 0;
    for (key, value) in answers {
        let value = scrub(value);
        if value.is_empty() {
            continue;
        }
        lines.push(format!("- {}: {}", scrub(&humanize(key)), value));
        listed += 1;
    }
    if listed == 0 {
        lines.push("- none".to_string());
    }
    lines.push(String::new());

    let bodies: [Vec<String>; 6] = [
        vec![format!("Resolved situation: {situation}")],
        vec![format!("Goals: {goals}")],
        vec![format!("Blockers: {blockers}")],
        vec![
            "Outline an approach that moves from the situation above to the stated goals."
                .to_string(),
            "Address each blocker explicitly.".to_string(),
        ],
        vec!["List three to five concrete steps that can start this week.".to_string()],
        vec![
            format!("Tone: {tone}"),
            format!("Timeframe: {timeframe}"),
            "Close with two questions that would sharpen the next draft.".to_string(),
        ],
    ];

    for (heading, body) in SECTION_HEADINGS.iter().zip(bodies) {
        lines.push(heading.to_string());
        lines.extend(body);
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}
