//! Favicon lookup
//!
//! Candidate urls come from third-party favicon APIs; each is validated over
//! HTTP until one passes (or, in quality mode, the best-scoring one wins).
//! Domains of the extended-timeout class fall back to probing the site.

pub mod fallback;
pub mod logos;
pub mod resolver;
pub mod search;
pub mod templates;
pub mod validate;

pub use logos::{
    InvalidLogo, MissingLogo, UpdateSummary, VerifySummary, find_logo, scan_missing,
    update_missing, verify_logos,
};
pub use resolver::FaviconResolver;
pub use search::{FaviconValidator, ScoredCandidate, SearchOptions, best_match, first_match};
pub use templates::{DOMAIN_PLACEHOLDER, candidates_for};
pub use validate::{HttpValidator, QualityInfo, QualityLevel};
