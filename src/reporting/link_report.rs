//! Link-check reports in Markdown, JSON and plain text

use chrono::{DateTime, Local};
use serde_json::json;

use crate::core::constants::output_formats;
use crate::core::error::Result;
use crate::linkcheck::{CheckOutcome, LinkResult};

pub trait FormatLinkReport {
    fn format(&self, outcome: &CheckOutcome, generated_at: &DateTime<Local>) -> Result<String>;
}

#[derive(Default)]
pub struct MarkdownFormatter;

#[derive(Default)]
pub struct JsonFormatter;

#[derive(Default)]
pub struct TextFormatter;

/// Formatter for `markdown`, `json` or `text`; anything else renders text
pub fn formatter_for(format: &str) -> Box<dyn FormatLinkReport> {
    match format {
        output_formats::MARKDOWN => Box::new(MarkdownFormatter),
        output_formats::JSON => Box::new(JsonFormatter),
        _ => Box::new(TextFormatter),
    }
}

pub fn render(format: &str, outcome: &CheckOutcome, generated_at: &DateTime<Local>) -> Result<String> {
    formatter_for(format).format(outcome, generated_at)
}

fn human_timestamp(generated_at: &DateTime<Local>) -> String {
    generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn detail(link: &LinkResult) -> &str {
    link.error.as_deref().unwrap_or("Unknown error")
}

/// Table cells cannot hold a raw `|` or a line break
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

impl FormatLinkReport for MarkdownFormatter {
    fn format(&self, outcome: &CheckOutcome, generated_at: &DateTime<Local>) -> Result<String> {
        let stats = &outcome.stats;
        let mut report = vec![
            "# Link Check Report".to_string(),
            String::new(),
            format!("**Generated**: {}", human_timestamp(generated_at)),
            format!("**ISO time**: {}", generated_at.to_rfc3339()),
            String::new(),
            "## 📊 Statistics".to_string(),
            String::new(),
            format!("- **Total links**: {}", stats.total),
            format!(
                "- **Success**: {} ({:.1}%)",
                stats.success,
                stats.percentage(stats.success)
            ),
            format!("- **Redirects**: {}", stats.redirect),
            format!("- **Timeouts**: {}", stats.timeout),
            format!("- **SSL errors**: {}", stats.ssl_error),
            format!("- **DNS errors**: {}", stats.dns_error),
            format!("- **HTTP/connection errors**: {}", stats.failed),
            format!("- **Invalid URLs**: {}", stats.invalid_url),
            format!("- **Other errors**: {}", stats.unknown_error),
            String::new(),
            format!("**Overall success rate**: {:.1}%", stats.success_rate()),
            String::new(),
        ];

        let failed = outcome.failed_links();
        if !failed.is_empty() {
            report.extend([
                "## ❌ Failed Links".to_string(),
                String::new(),
                "| Site | Category | URL | Error type | Details |".to_string(),
                "|------|----------|-----|------------|---------|".to_string(),
            ]);
            for link in failed {
                let code = link
                    .status_code
                    .map(|code| format!(" (HTTP {code})"))
                    .unwrap_or_default();
                report.push(format!(
                    "| {} | {} | {} | {}{code} | {} |",
                    cell(&link.title),
                    cell(&link.category),
                    cell(&link.url),
                    link.status,
                    cell(detail(link))
                ));
            }
            report.push(String::new());
        }

        report.extend(["## 📋 Results by Category".to_string(), String::new()]);

        for category in outcome.categories() {
            report.push(format!(
                "### {} ({}/{} ok)",
                category.category, category.ok, category.total
            ));
            report.push(String::new());

            for link in outcome
                .results()
                .iter()
                .filter(|link| link.category == category.category)
            {
                let time = link
                    .response_time
                    .filter(|seconds| *seconds > 0.0)
                    .map(|seconds| format!(" ({seconds}s)"))
                    .unwrap_or_default();
                let redirect = link
                    .final_url
                    .as_deref()
                    .filter(|target| *target != link.url)
                    .map(|target| format!(" → [{target}]({target})"))
                    .unwrap_or_default();

                report.push(format!(
                    "- {} **{}** - [{url}]({url}){time}{redirect}",
                    link.status.emoji(),
                    link.title,
                    url = link.url
                ));
                if let Some(ref error) = link.error {
                    report.push(format!("  - ❌ {error}"));
                }
            }
            report.push(String::new());
        }

        Ok(report.join("\n"))
    }
}

impl FormatLinkReport for JsonFormatter {
    fn format(&self, outcome: &CheckOutcome, generated_at: &DateTime<Local>) -> Result<String> {
        let stats = &outcome.stats;
        let success_rate = (stats.success_rate() * 10.0).round() / 10.0;

        let report = json!({
            "metadata": {
                "generated_at": human_timestamp(generated_at),
                "iso_timestamp": generated_at.to_rfc3339(),
                "total_links": stats.total,
                "success_rate": success_rate,
            },
            "statistics": stats,
            "categories": outcome.categories(),
            "results": outcome.results(),
            "failed_links": outcome.failed_links(),
        });

        Ok(serde_json::to_string_pretty(&report)?)
    }
}

impl FormatLinkReport for TextFormatter {
    fn format(&self, outcome: &CheckOutcome, generated_at: &DateTime<Local>) -> Result<String> {
        let stats = &outcome.stats;
        let failed = outcome.failed_links();
        let banner = "=".repeat(60);

        let mut report = vec![
            banner.clone(),
            "Link Check Report".to_string(),
            banner,
            format!("Generated: {}", human_timestamp(generated_at)),
            String::new(),
            "📊 Statistics:".to_string(),
            format!("  Total links: {}", stats.total),
            format!(
                "  Success: {} ({:.1}%)",
                stats.success,
                stats.percentage(stats.success)
            ),
            format!("  Redirects: {}", stats.redirect),
            format!("  Failed links: {}", failed.len()),
            format!("  Overall success rate: {:.1}%", stats.success_rate()),
            String::new(),
        ];

        if !failed.is_empty() {
            report.extend(["❌ Failed links:".to_string(), "-".repeat(40)]);
            for link in failed {
                report.push(format!("• {} ({})", link.title, link.url));
                report.push(format!("  Error: {} - {}", link.status, detail(link)));
                report.push(String::new());
            }
        }

        Ok(report.join("\n"))
    }
}
