//! Reports and structured logging
//!
//! This module renders the link-check and logo status reports and holds the
//! logging helpers shared by the three binaries.

pub mod link_report;
pub mod logging;
pub mod logo_report;

// Re-export commonly used items
pub use link_report::{FormatLinkReport, JsonFormatter, MarkdownFormatter, TextFormatter, render};
pub use logo_report::{LogoCoverage, render_logo_report};
