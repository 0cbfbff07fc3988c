//! Dataset-level logo operations: scan, update and verify

use async_trait::async_trait;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::core::constants::timeouts;
use crate::core::types::WorkItem;
use crate::dataset::{Dataset, WorkFilter, enumerate};
use crate::favicon::resolver::FaviconResolver;
use crate::net::extract_domain;
use crate::pipeline::{BulkFetcher, Probe};
use crate::reporting::logging::{log_item_result, log_run_complete, log_run_start};
use crate::ui::progress::ProgressReporter;

/// An entry without a logo and the domain its favicon is looked up for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLogo {
    pub item: WorkItem,
    pub domain: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateSummary {
    pub scanned: usize,
    pub domains: usize,
    pub updated: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// A logo that failed validation and was cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLogo {
    pub title: String,
    pub logo: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct VerifySummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: Vec<InvalidLogo>,
    /// Checks that crashed before giving an answer; those logos are kept
    pub unchecked: usize,
}

impl VerifySummary {
    /// Share of valid logos in percent, 0 when nothing was checked
    pub fn validity_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64 * 100.0
        }
    }
}

/// Entries whose logo is null, absent or blank and whose url yields a domain
pub fn scan_missing(dataset: &Dataset) -> Vec<MissingLogo> {
    enumerate(dataset, |entry| WorkFilter::MissingLogo.matches(entry))
        .into_iter()
        .filter_map(|item| {
            let domain = extract_domain(&item.url)?;
            Some(MissingLogo { item, domain })
        })
        .collect()
}

/// Resolve a favicon for a url or bare domain, optionally in quality mode
pub async fn find_logo(
    resolver: &FaviconResolver,
    target: &str,
    quality_mode: bool,
    note: &mut (dyn FnMut(String) + Send),
) -> Option<String> {
    let domain = extract_domain(target)?;
    note(format!("🔍 Looking up favicon for: {domain}"));

    if quality_mode {
        resolver.resolve_best(&domain, note).await
    } else {
        resolver.resolve(&domain, note).await
    }
}

/// Resolves the favicon of the work item's domain
struct ResolveProbe {
    resolver: FaviconResolver,
}

#[async_trait]
impl Probe for ResolveProbe {
    type Output = Option<String>;

    async fn probe(&self, item: &WorkItem) -> Option<String> {
        let domain = extract_domain(&item.url)?;
        self.resolver
            .resolve(&domain, &mut |line| debug!("{}", line.trim()))
            .await
    }
}

/// Checks the work item's current logo
struct ValidateProbe {
    resolver: FaviconResolver,
    timeout: Duration,
}

#[async_trait]
impl Probe for ValidateProbe {
    type Output = bool;

    async fn probe(&self, item: &WorkItem) -> bool {
        match item.logo.as_deref().map(str::trim) {
            Some(logo) if !logo.is_empty() => self.resolver.is_valid(logo, self.timeout).await,
            _ => false,
        }
    }
}

/// Look up every unique domain among `missing` once and write the results
/// into the dataset. Entries whose domain resolved get the logo; the rest
/// stay untouched.
pub async fn update_missing(
    dataset: &mut Dataset,
    missing: &[MissingLogo],
    resolver: &FaviconResolver,
    settings: &Settings,
    progress: &mut ProgressReporter,
) -> UpdateSummary {
    let started = Instant::now();

    let mut seen = FxHashSet::default();
    let representatives: Vec<WorkItem> = missing
        .iter()
        .filter(|entry| seen.insert(entry.domain.clone()))
        .map(|entry| entry.item.clone())
        .collect();
    let domains = representatives.len();

    log_run_start("logo", domains, settings.workers);
    progress.line(&format!("🔄 Fetching favicons for {domains} domain(s)..."));
    progress.start(domains, "domains");

    let probe = Arc::new(ResolveProbe {
        resolver: resolver.clone(),
    });
    let mut completions = BulkFetcher::from_settings(settings).run(probe, representatives);
    let mut resolved: FxHashMap<String, String> = FxHashMap::default();

    while let Some((item, logo)) = completions.next().await {
        let done = completions.completed();
        let domain = extract_domain(&item.url).unwrap_or_default();
        match logo.flatten() {
            Some(logo) => {
                log_item_result(&domain, "resolved");
                progress.line(&format!("  [{done:>3}/{domains}] ✅ {domain} -> {logo}"));
                resolved.insert(domain, logo);
            }
            None => {
                log_item_result(&domain, "no favicon");
                progress.line(&format!("  [{done:>3}/{domains}] ❌ {domain}: no favicon found"));
            }
        }
        progress.advance();
    }
    progress.finish("domains processed");

    let mut summary = UpdateSummary {
        scanned: missing.len(),
        domains,
        ..Default::default()
    };

    for entry in missing {
        let logo = resolved.get(&entry.domain);
        match (logo, dataset.entry_mut(entry.item.path)) {
            (Some(logo), Some(target)) => {
                target.logo = Some(logo.clone());
                summary.updated += 1;
            }
            _ => summary.failed += 1,
        }
    }

    summary.elapsed = started.elapsed();
    log_run_complete("logo", summary.updated, summary.scanned, summary.elapsed.as_millis());
    summary
}

/// Work items for every entry that has a logo, whether or not it has a url
fn logo_items(dataset: &Dataset) -> Vec<WorkItem> {
    dataset
        .links()
        .filter(|(_, _, _, entry)| entry.has_logo())
        .enumerate()
        .map(|(index, (path, category, group, entry))| WorkItem {
            index,
            path,
            category: category.taxonomy.clone(),
            term: group.term.clone(),
            title: entry.title.clone(),
            url: entry.url.trim().to_string(),
            description: entry.description.clone(),
            logo: entry.logo.clone(),
        })
        .collect()
}

/// Only a definite failure clears the logo; a check without an answer
/// leaves the entry as it was.
fn apply_verdict(dataset: &mut Dataset, item: &WorkItem, verdict: Option<bool>) {
    if verdict == Some(false)
        && let Some(entry) = dataset.entry_mut(item.path)
    {
        entry.logo = Some(String::new());
    }
}

/// Validate every existing logo and clear the ones that fail to `""`
pub async fn verify_logos(
    dataset: &mut Dataset,
    resolver: &FaviconResolver,
    settings: &Settings,
    progress: &mut ProgressReporter,
) -> VerifySummary {
    let started = Instant::now();
    let items = logo_items(dataset);
    let total = items.len();

    log_run_start("logo verify", total, settings.workers);
    progress.line(&format!("🔍 Verifying {total} logo(s)..."));
    progress.start(total, "logos");

    let probe = Arc::new(ValidateProbe {
        resolver: resolver.clone(),
        timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
    });
    let mut completions = BulkFetcher::from_settings(settings).run(probe, items);
    let mut summary = VerifySummary {
        total,
        ..Default::default()
    };
    let mut invalid = Vec::new();

    while let Some((item, valid)) = completions.next().await {
        let logo = item.logo.clone().unwrap_or_default();
        apply_verdict(dataset, &item, valid);
        match valid {
            Some(true) => {
                summary.valid += 1;
                log_item_result(&logo, "valid");
            }
            Some(false) => {
                log_item_result(&logo, "invalid");
                progress.line(&format!("  ❌ {}: {logo}", item.title));
                invalid.push(item);
            }
            None => {
                summary.unchecked += 1;
                log_item_result(&logo, "check failed, kept");
                progress.line(&format!("  ⚠️  {}: check failed, logo kept", item.title));
            }
        }
        progress.advance();
    }
    progress.finish("logos verified");

    invalid.sort_by_key(|item| item.index);
    summary.invalid = invalid
        .into_iter()
        .map(|item| InvalidLogo {
            title: item.title,
            logo: item.logo.unwrap_or_default(),
        })
        .collect();

    log_run_complete(
        "logo verify",
        summary.valid,
        summary.total,
        started.elapsed().as_millis(),
    );
    summary
}
