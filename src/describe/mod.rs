//! Description generator
//!
//! Scrapes each homepage, picks the best self-description it offers and
//! writes it into the dataset.

pub mod generator;
pub mod heuristic;
pub mod page;

pub use generator::{DescribeSummary, describe_single, fetch_page, update_descriptions};
pub use heuristic::{clean_candidate, generate_description};
pub use page::PageInfo;
