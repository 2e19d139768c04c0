//! Placeholder template engine: renders items into prompt text.
//!
//! Items are rendered into a fixed multi-section prompt. Any bracketed name
//! (`[market]`, `[target audience]`) in the result is a placeholder token the
//! user is expected to fill in:
//!
//! ```text
//! ┌─────────┐  compose   ┌────────────┐  apply_values  ┌─────────────┐
//! │  Item   │──────────▶ │ prompt text│──────────────▶ │ filled text │
//! └─────────┘            └────────────┘                └─────────────┘
//!                              │ extract_tokens
//!                        ┌─────┴──────┐   missing   ┌────────────┐
//!                        │  tokens    │───────────▶ │ Guardrail  │
//!                        └────────────┘             └────────────┘
//! ```
//!
//! Everything here is pure and fail-soft: absent fields fall back to the
//! documented defaults and unmatched tokens pass through untouched.

mod compose;
mod guardrail;
mod tokens;

pub use compose::{
    DEFAULT_AUDIENCE, DEFAULT_CONSTRAINTS, DEFAULT_DELIVERABLE, DEFAULT_INPUTS, DEFAULT_ITERATION,
    DEFAULT_OUTPUT_FORMAT, DEFAULT_RISK_NOTE, DEFAULT_ROLE, DEFAULT_SUCCESS, DEFAULT_TOOLS,
    QUALITY_CONTROLS, compose,
};
pub use guardrail::{DEFAULT_MISSING_THRESHOLD, Guardrail, GuardrailVerdict, missing};
pub use tokens::{apply_values, extract_tokens, presentable_tokens, scan_tokens};

use promptloom_core::{FieldValues, Item};

/// Compose an item and substitute the supplied values in one step.
pub fn render(item: &Item, values: &FieldValues) -> String {
    apply_values(&compose(item), values)
}
