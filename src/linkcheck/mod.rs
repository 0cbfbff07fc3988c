//! Link checker
//!
//! Probes every dataset url once and classifies the outcome.

pub mod checker;
pub mod classify;
pub mod stats;

pub use checker::{LinkResult, check_link, check_links};
pub use classify::LinkStatus;
pub use stats::{CategoryStats, CheckOutcome, LinkStats};
