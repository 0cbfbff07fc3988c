//! Link-directory dataset
//!
//! This module holds the typed YAML model, whole-document load/save and
//! the enumerator that turns the nested document into work items.

pub mod enumerate;
pub mod model;
pub mod store;

// Re-export commonly used items
pub use enumerate::{WorkFilter, enumerate};
pub use model::{Category, Dataset, LinkEntry, ModelError, TermGroup};
pub use store::{load, save};
