//! Missing-field guardrail.
//!
//! Diffs an item's placeholder tokens against the supplied values and tells
//! the host whether a "finalize" action should be interrupted.

use crate::tokens::extract_tokens;
use promptloom_core::{FieldValues, Item, filled};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Interrupt finalize once this many tokens are still unfilled.
pub const DEFAULT_MISSING_THRESHOLD: usize = 2;

/// Tokens of `item` that have no non-blank value in `values`, in token order.
pub fn missing(item: &Item, values: &FieldValues) -> Vec<String> {
    extract_tokens(item)
        .into_iter()
        .filter(|token| filled(values, token.trim()).is_none())
        .collect()
}

/// The outcome of a guardrail check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    /// Unfilled tokens, first-seen order.
    pub missing: Vec<String>,
    /// Whether the finalize action should be interrupted.
    pub interrupt: bool,
}

/// Finalize policy over [`missing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardrail {
    pub threshold: usize,
}

impl Default for Guardrail {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MISSING_THRESHOLD,
        }
    }
}

impl Guardrail {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn check(&self, item: &Item, values: &FieldValues) -> GuardrailVerdict {
        let missing = missing(item, values);
        let interrupt = missing.len() >= self.threshold;
        if interrupt {
            info!(
                item = %item.key(),
                missing = missing.len(),
                threshold = self.threshold,
                "Finalize interrupted: placeholders still unfilled"
            );
        } else {
            debug!(item = %item.key(), missing = missing.len(), "Guardrail passed");
        }
        GuardrailVerdict { missing, interrupt }
    }
}
