//! Error types for the promptloom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The engines themselves are fail-soft; errors only surface when the host
//! loads or validates data it is about to hand to them.

use thiserror::Error;

/// The top-level error type for all promptloom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Item in group '{group}' has a blank title")]
    BlankTitle { group: String },

    #[error("Duplicate item '{title}' in group '{group}'")]
    DuplicateItem { title: String, group: String },

    #[error("Group '{group}' expected position {expected}, found {found}")]
    PositionGap {
        group: String,
        expected: usize,
        found: usize,
    },
}
