//! Template search over a favicon validator
//!
//! Both searches are pure over the [`FaviconValidator`] they are given, so
//! they can be exercised with a fake one.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

use crate::core::constants::display::URL_WIDTH;
use crate::core::constants::favicon::{
    LARGE_SIZE_BONUS, LARGE_SIZE_MARKERS, POSITION_WEIGHT, SPECIALIST_BONUS, SPECIALIST_MARKERS,
};
use crate::favicon::validate::QualityInfo;

#[async_trait]
pub trait FaviconValidator: Send + Sync {
    /// Whether `url` serves something that looks like an icon
    async fn is_valid(&self, url: &str, timeout: Duration) -> bool;

    /// HEAD-based quality information
    async fn quality(&self, url: &str) -> QualityInfo;
}

/// Timing of one template search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Timeout for each candidate probe
    pub timeout: Duration,
    /// Pause between two candidates of the same domain
    pub attempt_delay: Duration,
}

/// A candidate that passed validation in quality mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub url: String,
    pub score: i64,
    pub file_size: Option<u64>,
}

/// First candidate the validator accepts.
///
/// `note` receives one human-readable line per attempt.
pub async fn first_match<V>(
    candidates: &[String],
    validator: &V,
    options: SearchOptions,
    note: &mut (dyn FnMut(String) + Send),
) -> Option<String>
where
    V: FaviconValidator + ?Sized,
{
    let total = candidates.len();

    for (position, candidate) in candidates.iter().enumerate() {
        note(format!(
            "  [{}/{total}] Testing: {}",
            position + 1,
            shorten(candidate)
        ));

        if validator.is_valid(candidate, options.timeout).await {
            note(format!("  ✅ Found usable favicon: {candidate}"));
            return Some(candidate.clone());
        }

        note("  ❌ Unavailable".to_string());
        pause(options.attempt_delay, position, total).await;
    }

    None
}

/// Highest-scoring candidate among those that pass validation and the
/// quality check. Ties keep the earlier candidate; a candidate scoring 0
/// never wins.
pub async fn best_match<V>(
    candidates: &[String],
    validator: &V,
    options: SearchOptions,
    note: &mut (dyn FnMut(String) + Send),
) -> Option<ScoredCandidate>
where
    V: FaviconValidator + ?Sized,
{
    let total = candidates.len();
    let mut best: Option<ScoredCandidate> = None;

    for (position, candidate) in candidates.iter().enumerate() {
        note(format!(
            "  [{}/{total}] Testing: {}",
            position + 1,
            shorten(candidate)
        ));

        if !validator.is_valid(candidate, options.timeout).await {
            note("    ❌ Unavailable".to_string());
            pause(options.attempt_delay, position, total).await;
            continue;
        }

        let quality = validator.quality(candidate).await;
        if !quality.valid {
            note("    ❌ Quality check failed".to_string());
            pause(options.attempt_delay, position, total).await;
            continue;
        }

        let size = quality.known_size();
        let score = score(candidate, position + 1, total, size);
        let size_info = size.map(|bytes| format!(" ({bytes}B)")).unwrap_or_default();
        note(format!("    ✅ Usable (score: {score}{size_info})"));

        if score > best.as_ref().map_or(0, |current| current.score) {
            note("    🏆 Current best".to_string());
            best = Some(ScoredCandidate {
                url: candidate.clone(),
                score,
                file_size: size,
            });
        }

        pause(options.attempt_delay, position, total).await;
    }

    best
}

/// Quality score of a passing candidate at 1-based `position` of `total`.
pub fn score(url: &str, position: usize, total: usize, file_size: Option<u64>) -> i64 {
    let size_points = match file_size {
        Some(1_000..=20_000) => 50,
        Some(500..=50_000) => 30,
        Some(_) => 10,
        None => 0,
    };

    let position_points = total.saturating_sub(position) as i64 * POSITION_WEIGHT;

    let specialist = if SPECIALIST_MARKERS.iter().any(|marker| url.contains(marker)) {
        SPECIALIST_BONUS
    } else {
        0
    };
    let large = if LARGE_SIZE_MARKERS.iter().any(|marker| url.contains(marker)) {
        LARGE_SIZE_BONUS
    } else {
        0
    };

    size_points + position_points + specialist + large
}

async fn pause(delay: Duration, position: usize, total: usize) {
    if !delay.is_zero() && position + 1 < total {
        sleep(delay).await;
    }
}

fn shorten(url: &str) -> String {
    let cut: String = url.chars().take(URL_WIDTH).collect();
    if cut.len() < url.len() {
        format!("{cut}...")
    } else {
        cut
    }
}
