//! Maintenance tools for a YAML link directory.
//!
//! Three binaries share this library: a description generator, a link
//! checker and a favicon fetcher. Each one loads the dataset, fans its
//! links out over a bounded worker pool, folds the results back in and
//! either saves the dataset or writes a report.

pub mod config;
pub mod core;
pub mod dataset;
pub mod describe;
pub mod favicon;
pub mod linkcheck;
pub mod net;
pub mod pipeline;
pub mod reporting;
pub mod ui;

// Re-export the most commonly used types
pub use config::{CliConfig, Config, Settings, ToolDefaults};
pub use core::{EntryPath, Result, WebstackError, WorkItem};
pub use dataset::{Dataset, LinkEntry};
pub use net::HttpClient;
pub use pipeline::{BulkFetcher, Probe};
