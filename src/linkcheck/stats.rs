use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::linkcheck::checker::LinkResult;
use crate::linkcheck::classify::LinkStatus;

/// Run-level counters. `failed` counts HTTP errors and connection errors;
/// the other failure kinds have their own counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub timeout: usize,
    pub redirect: usize,
    pub ssl_error: usize,
    pub dns_error: usize,
    pub invalid_url: usize,
    pub unknown_error: usize,
}

impl LinkStats {
    pub fn record(&mut self, status: LinkStatus) {
        let counter = match status {
            LinkStatus::Success => &mut self.success,
            LinkStatus::Redirect => &mut self.redirect,
            LinkStatus::HttpError | LinkStatus::ConnectionError => &mut self.failed,
            LinkStatus::Timeout => &mut self.timeout,
            LinkStatus::SslError => &mut self.ssl_error,
            LinkStatus::DnsError => &mut self.dns_error,
            LinkStatus::InvalidUrl => &mut self.invalid_url,
            LinkStatus::UnknownError => &mut self.unknown_error,
        };
        *counter += 1;
    }

    /// Share of `count` in the total, in percent
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    /// (success + redirect) / total, in percent
    pub fn success_rate(&self) -> f64 {
        self.percentage(self.success + self.redirect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

/// Everything a link-check run produced, owned by the draining loop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    pub stats: LinkStats,
    results: Vec<LinkResult>,
}

impl CheckOutcome {
    pub fn new(total: usize) -> Self {
        Self {
            stats: LinkStats {
                total,
                ..Default::default()
            },
            results: Vec::with_capacity(total),
        }
    }

    pub fn record(&mut self, result: LinkResult) {
        self.stats.record(result.status);
        self.results.push(result);
    }

    /// Results in enumeration order
    pub fn results(&self) -> &[LinkResult] {
        &self.results
    }

    /// Put the results back into enumeration order once draining is done
    pub fn sort(&mut self) {
        self.results.sort_by_key(|result| result.index);
    }

    /// Everything that is neither success nor redirect
    pub fn failed_links(&self) -> Vec<&LinkResult> {
        self.results
            .iter()
            .filter(|result| !result.status.is_ok())
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|result| !result.status.is_ok())
    }

    /// Per-category totals in order of first appearance
    pub fn categories(&self) -> Vec<CategoryStats> {
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut categories: Vec<CategoryStats> = Vec::new();

        for result in &self.results {
            let position = *positions.entry(result.category.as_str()).or_insert_with(|| {
                categories.push(CategoryStats {
                    category: result.category.clone(),
                    total: 0,
                    ok: 0,
                    failed: 0,
                });
                categories.len() - 1
            });

            let entry = &mut categories[position];
            entry.total += 1;
            if result.status.is_ok() {
                entry.ok += 1;
            } else {
                entry.failed += 1;
            }
        }

        categories
    }
}
