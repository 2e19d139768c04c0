//! `promptloom score` and `promptloom brief`.

use super::files::{CmdResult, load_values, read_text};
use promptloom_config::AppConfig;
use promptloom_insight::{score as score_answers, synthesize, thresholds_crossed};
use std::path::Path;

pub fn score(answers: &Path, expected: &[String], previous: Option<u32>) -> CmdResult {
    let config = AppConfig::load()?;
    let answers = load_values(answers)?;
    let report = score_answers(&answers, expected);

    println!("Score: {}/100", report.score);
    if report.total_possible > 0 {
        println!("Answered: {}/{}", report.filled_count, report.total_possible);
    }
    if !report.suggestions.is_empty() {
        println!("Suggestions: {}", report.suggestions.join(", "));
    }
    if let Some(previous) = previous {
        for tier in thresholds_crossed(previous, report.score, &config.quality.thresholds) {
            println!("Reached tier {tier}");
        }
    }
    Ok(())
}

pub fn brief(answers: &Path, challenge: &str, base: Option<&Path>) -> CmdResult {
    let answers = load_values(answers)?;
    let base = match base {
        Some(path) => read_text(path)?,
        None => String::new(),
    };
    println!("{}", synthesize(&base, challenge, &answers));
    Ok(())
}
