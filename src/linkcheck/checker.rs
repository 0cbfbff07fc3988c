use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::core::constants::display;
use crate::core::types::WorkItem;
use crate::linkcheck::classify::{LinkStatus, classify_error, error_chain};
use crate::linkcheck::stats::CheckOutcome;
use crate::net::{HttpClient, normalize_url};
use crate::pipeline::{BulkFetcher, Probe};
use crate::reporting::logging::{log_item_result, log_run_complete, log_run_start};
use crate::ui::progress::ProgressReporter;

/// Outcome of checking one link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkResult {
    /// Enumeration position, used to restore document order
    #[serde(skip)]
    pub index: usize,
    pub url: String,
    pub title: String,
    /// `"{taxonomy} > {term}"`
    pub category: String,
    pub status: LinkStatus,
    pub status_code: Option<u16>,
    /// Seconds, two decimals; the timeout itself for timeouts
    pub response_time: Option<f64>,
    /// Where redirects ended, when that differs from the requested url
    pub final_url: Option<String>,
    pub error: Option<String>,
}

impl LinkResult {
    fn for_item(item: &WorkItem, status: LinkStatus) -> Self {
        Self {
            index: item.index,
            url: item.url.clone(),
            title: item.title.clone(),
            category: item.category_label(),
            status,
            status_code: None,
            response_time: None,
            final_url: None,
            error: None,
        }
    }

    pub fn failure(item: &WorkItem, status: LinkStatus, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::for_item(item, status)
        }
    }

    /// Console line printed while draining: `[  3/120] ✅ Title (0.42s)`
    pub fn progress_line(&self, position: usize, total: usize) -> String {
        let title: String = self.title.chars().take(display::TITLE_WIDTH).collect();
        let time = self
            .response_time
            .filter(|seconds| *seconds > 0.0)
            .map(|seconds| format!(" ({seconds}s)"))
            .unwrap_or_default();
        format!(
            "  [{position:3}/{total}] {} {title}{time}",
            self.status.emoji()
        )
    }
}

fn round_seconds(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

/// One GET, redirects followed, no retries.
pub async fn check_link(client: &HttpClient, settings: &Settings, item: &WorkItem) -> LinkResult {
    let Some(url) = normalize_url(&item.url) else {
        return LinkResult::failure(item, LinkStatus::InvalidUrl, "Invalid URL format");
    };

    let timeout = settings.timeout_for(url.as_str());
    let started = Instant::now();

    match client.get(url.as_str(), timeout).await {
        Ok(response) => {
            let code = response.status().as_u16();
            let status = LinkStatus::from_status_code(code);
            let final_url = (response.url() != &url).then(|| response.url().to_string());

            LinkResult {
                status_code: Some(code),
                response_time: Some(round_seconds(started.elapsed())),
                final_url,
                error: (status == LinkStatus::HttpError).then(|| format!("HTTP {code}")),
                ..LinkResult::for_item(item, status)
            }
        }
        Err(err) => {
            let status = classify_error(&err);
            let (response_time, message) = match status {
                LinkStatus::Timeout => (
                    timeout.as_secs_f64(),
                    format!("Timeout after {}s", timeout.as_secs()),
                ),
                LinkStatus::SslError => (
                    round_seconds(started.elapsed()),
                    "SSL certificate error".to_string(),
                ),
                LinkStatus::DnsError => (
                    round_seconds(started.elapsed()),
                    "DNS resolution failed".to_string(),
                ),
                LinkStatus::ConnectionError => (
                    round_seconds(started.elapsed()),
                    "Connection failed".to_string(),
                ),
                _ => (round_seconds(started.elapsed()), error_chain(&err)),
            };

            LinkResult {
                response_time: Some(response_time),
                ..LinkResult::failure(item, status, message)
            }
        }
    }
}

pub struct LinkProbe {
    client: HttpClient,
    settings: Settings,
}

impl LinkProbe {
    /// The link checker never retries, whatever the client was built with
    pub fn new(client: &HttpClient, settings: Settings) -> Self {
        Self {
            client: client.with_retries(0),
            settings,
        }
    }
}

#[async_trait]
impl Probe for LinkProbe {
    type Output = LinkResult;

    async fn probe(&self, item: &WorkItem) -> LinkResult {
        check_link(&self.client, &self.settings, item).await
    }
}

/// Check every item and aggregate the results. Results come back in
/// enumeration order.
pub async fn check_links(
    items: Vec<WorkItem>,
    client: &HttpClient,
    settings: &Settings,
    progress: &mut ProgressReporter,
) -> CheckOutcome {
    let started = Instant::now();
    let total = items.len();
    let mut outcome = CheckOutcome::new(total);

    progress.line(&format!("🔍 Checking {total} link(s)..."));
    progress.line(&format!("⚙️  Using {} worker(s)\n", settings.workers));
    log_run_start("linkcheck", total, settings.workers);
    progress.start(total, "links checked");

    let probe = Arc::new(LinkProbe::new(client, settings.clone()));
    let mut completions = BulkFetcher::from_settings(settings).run(probe, items);

    while let Some((item, result)) = completions.next().await {
        let result = result.unwrap_or_else(|| {
            LinkResult::failure(&item, LinkStatus::UnknownError, "Check aborted unexpectedly")
        });

        log_item_result(&result.url, result.status.as_str());
        progress.line(&result.progress_line(completions.completed(), total));
        progress.advance();
        outcome.record(result);
    }

    progress.finish("links checked");
    outcome.sort();
    log_run_complete(
        "linkcheck",
        outcome.stats.success + outcome.stats.redirect,
        total,
        started.elapsed().as_millis(),
    );
    outcome
}
