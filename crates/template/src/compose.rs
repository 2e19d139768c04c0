//! Deterministic multi-section prompt rendering.
//!
//! Section order is fixed. Every optional field that is absent or blank is
//! replaced by one of the `DEFAULT_*` strings below, several of which carry
//! their own placeholder tokens.

use promptloom_core::Item;

pub const DEFAULT_ROLE: &str = "an experienced specialist in [industry]";
pub const DEFAULT_AUDIENCE: &str = "[target audience]";
pub const DEFAULT_INPUTS: &str = "Work from the details provided: [key facts].";
pub const DEFAULT_CONSTRAINTS: &str =
    "Stay within [budget] and [timeline]. Avoid jargon the audience would not use.";
pub const DEFAULT_DELIVERABLE: &str = "A complete, ready-to-use first draft.";
pub const DEFAULT_OUTPUT_FORMAT: &str = "Short sections with clear headings and bullet points.";
pub const DEFAULT_SUCCESS: &str =
    "The result is specific to [business name] and can be acted on the same day.";
pub const DEFAULT_TOOLS: &str = "Reference any spreadsheets, CRM exports or analytics you can access; \
     otherwise name the data that would sharpen the answer.";
pub const DEFAULT_ITERATION: &str = "Ask up to three clarifying questions if critical details are missing, \
     then deliver the draft and offer two ways to refine it.";
pub const DEFAULT_RISK_NOTE: &str =
    "Flag assumptions and anything that needs human review before it is used.";

/// Fixed quality-control checklist; not driven by any item field.
pub const QUALITY_CONTROLS: &str = "Ground every claim in the facts above and say so when something is missing \
     instead of inventing it. Keep the language plain and specific.";

fn field<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Render an item into its canonical prompt text.
///
/// Pure: the same item always yields byte-identical output.
pub fn compose(item: &Item) -> String {
    let role = field(&item.role, DEFAULT_ROLE);
    let audience = field(&item.audience, DEFAULT_AUDIENCE);
    let inputs = field(&item.inputs, DEFAULT_INPUTS);
    let constraints = field(&item.constraints, DEFAULT_CONSTRAINTS);
    let deliverable = field(&item.deliverable, DEFAULT_DELIVERABLE);
    let output_format = field(&item.output_format, DEFAULT_OUTPUT_FORMAT);
    let success = field(&item.success_criteria, DEFAULT_SUCCESS);
    let tools = field(&item.tools, DEFAULT_TOOLS);
    let iteration = field(&item.iteration, DEFAULT_ITERATION);
    let risk_note = field(&item.risk_note, DEFAULT_RISK_NOTE);

    let mut out = format!("{}\n\n", item.title.trim());
    section(&mut out, "Role & Outcome", &format!("Act as {role}. Outcome: {}.", item.title.trim()));
    section(
        &mut out,
        "Audience & Channel",
        &format!("Write for {audience}, delivered through [channel]."),
    );
    section(&mut out, "Facts", inputs);
    section(&mut out, "Constraints", constraints);
    section(&mut out, "Deliverable", &format!("{deliverable}\nFormat: {output_format}"));
    section(&mut out, "Quality Controls", QUALITY_CONTROLS);
    section(&mut out, "Success Metrics", success);
    section(&mut out, "Tool Integration", tools);
    section(&mut out, "Iteration Loop", iteration);
    section(&mut out, "Risk Note", risk_note);

    out.truncate(out.trim_end().len());
    out
}

fn section(out: &mut String, heading: &str, body: &str) {
    out.push_str("## ");
    out.push_str(heading);
    out.push('\n');
    out.push_str(body);
    out.push_str("\n\n");
}
