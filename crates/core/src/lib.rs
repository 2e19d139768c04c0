//! # promptloom core
//!
//! Domain types and error definitions shared by every promptloom engine.
//! This crate performs no I/O. It defines the plain data structures the
//! engines exchange with the host application.
//!
//! ## Design Philosophy
//!
//! Every engine (template, catalog merge, insight, sequence) is a pure
//! function over the types defined here. The host owns persistence:
//! catalogs, snapshots and value maps arrive already loaded and leave as
//! new values.

pub mod error;
pub mod item;
pub mod catalog;
pub mod snapshot;
pub mod values;

// Re-export key types at crate root for ergonomics
pub use error::{CatalogError, Error, Result};
pub use item::{Item, ItemKey, normalize};
pub use catalog::Catalog;
pub use snapshot::{PartialItem, Snapshot};
pub use values::{FieldValues, filled};
