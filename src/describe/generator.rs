use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::core::types::WorkItem;
use crate::dataset::{Dataset, WorkFilter, enumerate};
use crate::describe::heuristic::generate_description;
use crate::describe::page::PageInfo;
use crate::net::{HttpClient, normalize_url};
use crate::pipeline::{BulkFetcher, Probe};
use crate::reporting::logging::{log_item_result, log_run_complete, log_run_start};
use crate::ui::progress::ProgressReporter;

/// Fetch a page and extract its [`PageInfo`]. Any transport error or non-2xx
/// status is a failure.
pub async fn fetch_page(client: &HttpClient, url: &str, timeout: Duration) -> Option<PageInfo> {
    let target = normalize_url(url)?;

    let response = match client.get(target.as_str(), timeout).await {
        Ok(response) => response,
        Err(err) => {
            debug!("Fetching {url} failed: {err}");
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("Fetching {url} returned HTTP {}", response.status().as_u16());
        return None;
    }

    match response.text().await {
        Ok(body) => Some(PageInfo::parse(&body)),
        Err(err) => {
            debug!("Reading {url} failed: {err}");
            None
        }
    }
}

/// Pipeline probe fetching each work item's homepage
pub struct DescriptionProbe {
    client: HttpClient,
    settings: Settings,
}

impl DescriptionProbe {
    pub fn new(client: HttpClient, settings: Settings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl Probe for DescriptionProbe {
    type Output = Option<PageInfo>;

    async fn probe(&self, item: &WorkItem) -> Option<PageInfo> {
        fetch_page(&self.client, &item.url, self.settings.timeout_for(&item.url)).await
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DescribeSummary {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl DescribeSummary {
    /// Average seconds spent per link, 0 for an empty run
    pub fn average_seconds(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() / self.total as f64
        }
    }
}

/// Fill in descriptions for the dataset in place.
///
/// With `only_missing` only entries whose description is null or absent are
/// touched. A failed fetch leaves the entry unchanged.
pub async fn update_descriptions(
    dataset: &mut Dataset,
    client: HttpClient,
    settings: &Settings,
    only_missing: bool,
    progress: &mut ProgressReporter,
) -> DescribeSummary {
    let started = Instant::now();
    let filter = if only_missing {
        WorkFilter::MissingDescription
    } else {
        WorkFilter::All
    };
    let items = enumerate(dataset, |entry| filter.matches(entry));
    let total = items.len();

    progress.line(&format!("Found {total} link(s) to update"));
    log_run_start("describe", total, settings.workers);
    progress.start(total, "pages");

    let probe = Arc::new(DescriptionProbe::new(client, settings.clone()));
    let mut completions = BulkFetcher::from_settings(settings).run(probe, items);
    let mut summary = DescribeSummary {
        total,
        ..Default::default()
    };

    while let Some((item, page)) = completions.next().await {
        let page = page.flatten();
        match generate_description(page.as_ref(), &item.title, &item.url) {
            Some(description) => {
                log_item_result(&item.url, "updated");
                progress.line(&format!("✓ {}: {description}", item.title));
                if let Some(entry) = dataset.entry_mut(item.path) {
                    entry.description = Some(description);
                }
                summary.updated += 1;
            }
            None => {
                log_item_result(&item.url, "unreachable");
                progress.line(&format!(
                    "✗ {}: unreachable, description left empty",
                    item.title
                ));
                summary.failed += 1;
            }
        }
        progress.advance();
    }

    progress.finish("pages processed");
    summary.elapsed = started.elapsed();
    log_run_complete(
        "describe",
        summary.updated,
        summary.total,
        summary.elapsed.as_millis(),
    );
    summary
}

/// Description for a single url without touching any dataset
pub async fn describe_single(client: &HttpClient, settings: &Settings, url: &str) -> Option<String> {
    let page = fetch_page(client, url, settings.timeout_for(url)).await;
    generate_description(page.as_ref(), "", url)
}
