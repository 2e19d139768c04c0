//! End-to-end pipeline tests for promptloom.
//!
//! These tests drive the engines the way the CLI does: a catalog is loaded
//! from JSON, refreshed from a snapshot, rendered and checked, answers are
//! scored and turned into a brief, and usage shapes the next suggestions.

use chrono::{DateTime, Duration, TimeZone, Utc};
use promptloom_catalog::{merge, merge_with_report, needs_refresh};
use promptloom_core::{Catalog, FieldValues, ItemKey, Snapshot};
use promptloom_insight::{TierTracker, score, synthesize};
use promptloom_sequence::{Provenance, RecentEvents, SequenceState, record_transition, suggest};
use promptloom_template::{Guardrail, apply_values, compose, extract_tokens, missing, render};

// ── Fixtures ─────────────────────────────────────────────────────────────

const CATALOG: &str = r#"{
  "items": [
    {
      "title": "Cold Email for [business name]",
      "group": "Module 1 — Sales Emails",
      "position": 0,
      "tags": ["email", "outreach"],
      "role": "a B2B copywriter",
      "audience": "operations managers in [market]"
    },
    {
      "title": "Follow Up",
      "group": "Module 1 — Sales Emails",
      "position": 1,
      "tags": ["email"]
    },
    {
      "title": "Launch Plan",
      "group": "Module 2 — Marketing",
      "position": 0,
      "tags": ["launch"]
    }
  ]
}"#;

const SNAPSHOT: &str = r#"{
  "version": "2026.03",
  "modules": {
    "sales emails": [
      { "title": "Breakup Email", "tags": ["email"] },
      { "title": "follow up" }
    ],
    "Marketing": [
      { "title": "Press Release", "successCriteria": "Picked up by two outlets" }
    ],
    "Operations": [
      { "title": "Vendor Review" }
    ]
  }
}"#;

fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn refreshed_catalog() -> Catalog {
    let local = Catalog::from_json(CATALOG).unwrap();
    let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
    merge(&local, &snapshot)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[test]
fn e2e_snapshot_refresh_extends_catalog() {
    let local = Catalog::from_json(CATALOG).unwrap();
    let snapshot = Snapshot::from_json(SNAPSHOT).unwrap();
    assert!(needs_refresh(None, &snapshot));

    let (merged, report) = merge_with_report(&local, &snapshot);
    assert_eq!(merged.len(), 5);
    assert_eq!(report.added, vec!["Breakup Email", "Press Release"]);
    assert_eq!(report.skipped_duplicates, 1);
    assert_eq!(report.unresolved_groups, vec!["Operations"]);
    assert!(merged.validate().is_ok());

    let sales = merged.group("Module 1 — Sales Emails");
    assert_eq!(sales[2].title, "Breakup Email");
    assert_eq!(sales[2].position, 2);
    let marketing = merged.group("Module 2 — Marketing");
    assert_eq!(
        marketing[1].success_criteria.as_deref(),
        Some("Picked up by two outlets")
    );

    // Merging the same snapshot again changes nothing.
    assert_eq!(merge(&merged, &snapshot), merged);
    assert!(!needs_refresh(report.version.as_deref(), &snapshot));
}

#[test]
fn e2e_compose_check_and_fill() {
    let catalog = refreshed_catalog();
    let item = catalog.find("cold email for [business name]", None).unwrap();

    let text = compose(item);
    assert!(text.starts_with("Cold Email for [business name]\n\n## Role & Outcome"));
    let tokens = extract_tokens(item);
    for token in &tokens {
        assert!(text.contains(&format!("[{token}]")), "missing [{token}]");
    }
    assert_eq!(&tokens[..2], ["business name", "market"]);

    let guardrail = Guardrail::default();
    let partial = values(&[("business name", "Acme Ltd"), ("market", "  ")]);
    let verdict = guardrail.check(item, &partial);
    assert!(verdict.interrupt);
    assert!(verdict.missing.contains(&"market".to_string()));
    assert!(!verdict.missing.contains(&"business name".to_string()));

    let everything: FieldValues = tokens
        .iter()
        .map(|t| (t.clone(), format!("<{t}>")))
        .collect();
    assert!(missing(item, &everything).is_empty());
    assert!(!guardrail.check(item, &everything).interrupt);

    let rendered = render(item, &everything);
    assert!(rendered.starts_with("Cold Email for <business name>"));
    assert_eq!(apply_values(&text, &FieldValues::new()), text);
}

#[test]
fn e2e_answers_score_then_brief() {
    let mut tracker = TierTracker::default();

    let first = values(&[("market", "Austin, TX")]);
    let first_report = score(&first, &["market".into(), "goal".into()]);
    assert_eq!(first_report.filled_count, 1);
    assert!(tracker.observe(first_report.score).is_empty());

    let full = values(&[
        ("market", "Independent coffee shops in Austin, TX"),
        ("goal", "Sign ten wholesale accounts"),
        ("biggest-challenge", "Buyers already have a roaster"),
        ("tone", "Friendly, no jargon"),
        ("deadline", "End of Q2"),
        ("custom-companion", "Mention the tasting kit"),
    ]);
    let full_report = score(&full, &["market".into(), "goal".into()]);
    assert!(full_report.score > first_report.score);
    assert_eq!(tracker.observe(full_report.score), vec![45, 65, 85]);

    let brief = synthesize("Write a wholesale pitch.", "wholesale-growth", &full);
    assert!(brief.starts_with("Write a wholesale pitch.\n\nChallenge: Wholesale growth"));
    assert!(brief.contains("Resolved situation: Independent coffee shops in Austin, TX"));
    assert!(brief.contains("Blockers: Buyers already have a roaster"));
    assert!(brief.contains("- Custom companion: Mention the tasting kit"));
    assert!(!brief.contains("**"));
}

#[test]
fn e2e_usage_shapes_suggestions() {
    let catalog = refreshed_catalog();
    let cold = catalog.find("Cold Email for [business name]", None).unwrap().key();
    let launch = catalog.find("Launch Plan", None).unwrap().key();
    let press = catalog.find("Press Release", None).unwrap().key();

    // Cold start: tag neighbours first, then the rest of the group.
    let cold_start = suggest(&SequenceState::new(), &catalog, &cold, 3);
    let titles: Vec<&str> = cold_start.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(titles, vec!["Follow Up", "Breakup Email"]);
    assert!(cold_start.iter().all(|s| s.provenance == Provenance::Tag));

    // Users hop cold email → launch plan twice and → press release once.
    let mut recent = RecentEvents::default();
    let mut state = SequenceState::new();
    let opens = [
        (cold.clone(), 0),
        (launch.clone(), 2),
        (cold.clone(), 30),
        (launch.clone(), 31),
        (cold.clone(), 60),
        (press.clone(), 62),
    ];
    for (key, minute) in opens {
        let at = t0() + Duration::minutes(minute);
        if let Some((from, to)) = recent.observe(key, at) {
            state = record_transition(state, &from, &to, at);
        }
    }

    let ranked = suggest(&state, &catalog, &cold, 3);
    let titles: Vec<&str> = ranked.iter().map(|s| s.item.title.as_str()).collect();
    assert_eq!(titles, vec!["Launch Plan", "Press Release", "Follow Up"]);
    assert_eq!(
        ranked[0].provenance,
        Provenance::Sequence { count: 2, percentage: 67 }
    );
    assert_eq!(
        ranked[1].provenance,
        Provenance::Sequence { count: 1, percentage: 33 }
    );
    assert!(ranked.iter().all(|s| s.item.key() != cold));

    let persisted: SequenceState =
        serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
    assert_eq!(persisted, state);
    assert!(state.get(&cold, &ItemKey::new("module 2 — marketing", "launch plan")).is_some());
}
