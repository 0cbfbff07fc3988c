//! Console summaries printed at the end of each run

use crate::config::Settings;
use crate::describe::DescribeSummary;
use crate::favicon::{MissingLogo, QualityInfo, UpdateSummary, VerifySummary};
use crate::linkcheck::CheckOutcome;
use crate::ui::color::{Colors, colorize, failure, heading, muted, success, warning};

/// Print every line to stdout
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn setting(label: &str, value: impl ToString) -> String {
    format!(
        "{}: {}",
        colorize(
            &format!("{}{label}{}", Colors::BOLD, Colors::RESET),
            Colors::CYAN
        ),
        value.to_string()
    )
}

/// The resolved run settings in a user-friendly form
pub fn settings_lines(settings: &Settings) -> Vec<String> {
    let mut lines = vec![
        setting("Dataset", settings.dataset.display()),
        setting("Workers", settings.workers),
        setting("Timeout (seconds)", settings.timeout.as_secs()),
        setting(
            "Extended timeout (seconds)",
            settings.extended_timeout.as_secs(),
        ),
        setting("Retry attempts", settings.retries),
    ];
    if settings.insecure {
        lines.push(setting("Skip SSL verification", true));
    }
    lines
}

pub fn describe_summary_lines(summary: &DescribeSummary) -> Vec<String> {
    vec![
        String::new(),
        heading("📊 Summary"),
        format!("  Total links:   {}", summary.total),
        format!("  Updated:       {}", success(&summary.updated.to_string())),
        format!("  Failed:        {}", failure(&summary.failed.to_string())),
        format!("  Elapsed:       {:.2}s", summary.elapsed.as_secs_f64()),
        format!("  Average:       {:.2}s per link", summary.average_seconds()),
    ]
}

pub fn linkcheck_summary_lines(outcome: &CheckOutcome) -> Vec<String> {
    let stats = &outcome.stats;
    let mut lines = vec![
        String::new(),
        heading("📊 Check complete"),
        format!("  Total:          {}", stats.total),
        format!(
            "  ✅ Success:     {} ({:.1}%)",
            success(&stats.success.to_string()),
            stats.percentage(stats.success)
        ),
        format!("  🔄 Redirects:   {}", stats.redirect),
        format!("  ⏰ Timeouts:    {}", stats.timeout),
        format!("  🔒 SSL errors:  {}", stats.ssl_error),
        format!("  🌐 DNS errors:  {}", stats.dns_error),
        format!("  ❌ Failed:      {}", stats.failed),
        format!("  🚫 Invalid:     {}", stats.invalid_url),
        format!("  ❓ Other:       {}", stats.unknown_error),
        format!("  Success rate:   {:.1}%", stats.success_rate()),
    ];

    if outcome.has_failures() {
        lines.push(warning(&format!(
            "\n⚠️  {} link(s) need attention",
            outcome.failed_links().len()
        )));
    } else {
        lines.push(success("\n🎉 All links are reachable"));
    }
    lines
}

/// One line per failed link, in enumeration order
pub fn failed_link_lines(outcome: &CheckOutcome) -> Vec<String> {
    let failed = outcome.failed_links();
    if failed.is_empty() {
        return vec![success("No failed links")];
    }

    let mut lines = vec![heading(&format!("❌ Failed links ({}):", failed.len()))];
    lines.extend(failed.iter().map(|link| {
        format!(
            "  {} {} - {} {}",
            link.status.emoji(),
            link.title,
            link.url,
            muted(&format!(
                "({})",
                link.error.as_deref().unwrap_or(link.status.as_str())
            ))
        )
    }));
    lines
}

/// Result of `check`: availability, type, size and quality level
pub fn quality_lines(info: &QualityInfo) -> Vec<String> {
    if !info.valid {
        return vec![failure(&format!(
            "❌ Logo unavailable: {}",
            info.error.as_deref().unwrap_or("unknown error")
        ))];
    }

    let size = info
        .known_size()
        .map(|bytes| format!(" ({bytes}B)"))
        .unwrap_or_default();
    let mut lines = vec![
        success(&format!("✅ Logo available: {}", info.url)),
        format!(
            "📊 Type: {}{size}",
            info.content_type.as_deref().unwrap_or("unknown")
        ),
        format!(
            "🏆 Quality: {}",
            info.level().map(|level| level.to_string()).unwrap_or_default()
        ),
    ];
    if let Some(message) = info.warning() {
        lines.push(warning(&format!("⚠️  {message}")));
    }
    lines
}

pub fn scan_lines(missing: &[MissingLogo]) -> Vec<String> {
    let mut lines = vec![format!("📋 {} site(s) without a logo:", missing.len())];
    lines.extend(
        missing
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("  {:2}. {} ({})", i + 1, entry.item.title, entry.domain)),
    );
    lines
}

pub fn update_summary_lines(summary: &UpdateSummary) -> Vec<String> {
    vec![
        String::new(),
        heading("📊 Update summary"),
        format!("  Scanned:  {}", summary.scanned),
        format!("  Domains:  {}", summary.domains),
        format!("  Updated:  {}", success(&summary.updated.to_string())),
        format!("  Failed:   {}", failure(&summary.failed.to_string())),
        format!("  Elapsed:  {:.2}s", summary.elapsed.as_secs_f64()),
    ]
}

pub fn verify_summary_lines(summary: &VerifySummary) -> Vec<String> {
    let mut lines = vec![String::new()];
    if !summary.invalid.is_empty() {
        lines.push(warning(&format!(
            "⚠️  Found {} invalid logo(s):",
            summary.invalid.len()
        )));
        lines.extend(
            summary
                .invalid
                .iter()
                .map(|logo| format!("  - {}: {}", logo.title, logo.logo)),
        );
        lines.push(String::new());
    }

    lines.extend([
        heading("📊 Verification results"),
        format!("  Total logos:    {}", summary.total),
        format!("  Valid:          {}", success(&summary.valid.to_string())),
        format!(
            "  Invalid:        {}",
            failure(&summary.invalid.len().to_string())
        ),
        format!("  Validity rate:  {:.1}%", summary.validity_rate()),
    ]);
    if summary.unchecked > 0 {
        lines.push(warning(&format!(
            "  Unchecked:      {} (logos kept)",
            summary.unchecked
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::work_item;
    use crate::favicon::InvalidLogo;
    use crate::linkcheck::{LinkResult, LinkStatus};
    use serial_test::serial;
    use std::time::Duration;

    fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    #[test]
    #[serial]
    fn test_describe_summary_lines__reports_average() {
        let summary = DescribeSummary {
            total: 4,
            updated: 3,
            failed: 1,
            elapsed: Duration::from_secs(2),
        };

        let lines = describe_summary_lines(&summary);
        assert!(contains(&lines, "Total links:   4"));
        assert!(contains(&lines, "Average:       0.50s per link"));
    }

    #[test]
    #[serial]
    fn test_failed_link_lines__lists_only_failures() {
        let mut outcome = CheckOutcome::new(2);
        let ok = work_item(0, "Fine", "https://fine.example");
        let bad = work_item(1, "Broken", "https://broken.example");
        outcome.record(LinkResult::failure(&bad, LinkStatus::DnsError, "DNS resolution failed"));
        outcome.record(LinkResult {
            status: LinkStatus::Success,
            status_code: Some(200),
            error: None,
            ..LinkResult::failure(&ok, LinkStatus::Success, "")
        });

        let lines = failed_link_lines(&outcome);

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Broken - https://broken.example"));
        assert!(lines[1].contains("DNS resolution failed"));
    }

    #[test]
    #[serial]
    fn test_failed_link_lines__none_failed() {
        let lines = failed_link_lines(&CheckOutcome::new(0));
        assert_eq!(lines, vec!["No failed links".to_string()]);
    }

    #[test]
    #[serial]
    fn test_quality_lines__low_quality_warns() {
        let info = QualityInfo {
            valid: true,
            url: "https://x.example/favicon.ico".to_string(),
            content_type: Some("image/x-icon".to_string()),
            file_size: Some(120),
            error: None,
        };

        let lines = quality_lines(&info);
        assert!(contains(&lines, "Type: image/x-icon (120B)"));
        assert!(contains(&lines, "Quality: low"));
        assert!(contains(&lines, "low-quality icon"));
    }

    #[test]
    #[serial]
    fn test_quality_lines__invalid() {
        let lines = quality_lines(&QualityInfo::invalid("https://x", "HTTP error"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Logo unavailable: HTTP error"));
    }

    #[test]
    #[serial]
    fn test_scan_lines__numbered() {
        let missing = vec![MissingLogo {
            item: work_item(0, "Gitee", "https://gitee.com"),
            domain: "gitee.com".to_string(),
        }];

        let lines = scan_lines(&missing);
        assert_eq!(lines[0], "📋 1 site(s) without a logo:");
        assert_eq!(lines[1], "   1. Gitee (gitee.com)");
    }

    #[test]
    #[serial]
    fn test_verify_summary_lines__lists_invalid_logos() {
        let summary = VerifySummary {
            total: 2,
            valid: 1,
            invalid: vec![InvalidLogo {
                title: "Bad".to_string(),
                logo: "https://bad.example/i.png".to_string(),
            }],
            unchecked: 0,
        };

        let lines = verify_summary_lines(&summary);
        assert!(contains(&lines, "  - Bad: https://bad.example/i.png"));
        assert!(contains(&lines, "Validity rate:  50.0%"));
        assert!(!contains(&lines, "Unchecked"));

        let crashed = VerifySummary {
            total: 1,
            unchecked: 1,
            ..Default::default()
        };
        assert!(contains(&verify_summary_lines(&crashed), "Unchecked:      1 (logos kept)"));
    }
}
