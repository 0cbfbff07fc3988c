//! User interface and interaction
//!
//! This module contains the components related to user interaction:
//! CLI parsing, console output, progress reporting and prompts.

pub mod cli;
pub mod color;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export commonly used items
pub use cli::{
    DescribeCli, LinkcheckCli, LogoCli, LogoCommand, describe_to_config, linkcheck_to_config,
    logo_to_config,
};
pub use progress::ProgressReporter;
pub use prompt::{clipboard_notice, confirm, copy_to_clipboard};
