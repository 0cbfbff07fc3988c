//! HTTP plumbing shared by all tools
//!
//! One [`HttpClient`] per run owns the connection pool; the URL helpers
//! normalise dataset urls and classify domains.

pub mod client;
pub mod urls;

pub use client::HttpClient;
pub use urls::{authority, extract_domain, is_extended_timeout_domain, normalize_url};
