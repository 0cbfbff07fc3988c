//! Markdown logo status report

use chrono::{DateTime, Local};

use crate::dataset::Dataset;

/// Logo coverage counts over the whole dataset
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogoCoverage {
    pub total: usize,
    pub with_logo: usize,
    pub without_logo: usize,
}

impl LogoCoverage {
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

/// Every entry, grouped by taxonomy (`##`) and term (`###`), marked ✅ when
/// it has a logo and ❌ otherwise, followed by coverage totals.
pub fn render_logo_report(dataset: &Dataset, generated_at: &DateTime<Local>) -> String {
    let mut report = vec![
        "# Logo Status Report".to_string(),
        String::new(),
        format!(
            "**Generated**: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("**ISO time**: {}", generated_at.to_rfc3339()),
        String::new(),
    ];
    let mut coverage = LogoCoverage::default();

    for category in &dataset.categories {
        report.push(format!("## {}", category.taxonomy));
        report.push(String::new());

        for group in &category.list {
            report.push(format!("### {}", group.term));
            report.push(String::new());

            for entry in &group.links {
                coverage.total += 1;
                if entry.has_logo() {
                    coverage.with_logo += 1;
                    report.push(format!("- ✅ **{}** - {}", entry.title, entry.url));
                    report.push(format!(
                        "  - Logo: {}",
                        entry.logo.as_deref().unwrap_or_default()
                    ));
                } else {
                    coverage.without_logo += 1;
                    report.push(format!("- ❌ **{}** - {}", entry.title, entry.url));
                }
                report.push(String::new());
            }
        }
    }

    report.extend([
        "**Statistics:**".to_string(),
        String::new(),
        format!("- Total sites: {}", coverage.total),
        format!(
            "- With logo: {} ({:.1}%)",
            coverage.with_logo,
            coverage.percentage(coverage.with_logo)
        ),
        format!(
            "- Missing logo: {} ({:.1}%)",
            coverage.without_logo,
            coverage.percentage(coverage.without_logo)
        ),
        String::new(),
    ]);

    report.join("\n")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::dataset::{Category, LinkEntry, TermGroup};
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Category::new(
                "常用推荐",
                vec![TermGroup::new(
                    "开发工具",
                    vec![
                        LinkEntry::new("GitHub", "https://github.com")
                            .with_logo("https://github.com/favicon.ico"),
                        LinkEntry::new("Gitee", "https://gitee.com"),
                    ],
                )],
            ),
            Category::new(
                "Design",
                vec![TermGroup::new(
                    "Icons",
                    vec![LinkEntry::new("Iconfont", "https://www.iconfont.cn").with_logo(" ")],
                )],
            ),
        ])
    }

    #[test]
    fn test_render_logo_report__groups_by_taxonomy_and_term() {
        let report = render_logo_report(&dataset(), &timestamp());

        assert!(report.starts_with("# Logo Status Report"));
        assert!(report.contains("**Generated**: 2024-03-01 09:30:00"));

        let taxonomy = report.find("## 常用推荐").unwrap();
        let term = report.find("### 开发工具").unwrap();
        let github = report.find("- ✅ **GitHub** - https://github.com").unwrap();
        assert!(taxonomy < term && term < github);

        assert!(report.contains("  - Logo: https://github.com/favicon.ico"));
        assert!(report.contains("- ❌ **Gitee** - https://gitee.com"));
    }

    #[test]
    fn test_render_logo_report__blank_logo_counts_as_missing() {
        let report = render_logo_report(&dataset(), &timestamp());

        assert!(report.contains("- ❌ **Iconfont** - https://www.iconfont.cn"));
        assert!(report.contains("- Total sites: 3"));
        assert!(report.contains("- With logo: 1 (33.3%)"));
        assert!(report.contains("- Missing logo: 2 (66.7%)"));
    }

    #[test]
    fn test_render_logo_report__empty_dataset() {
        let report = render_logo_report(&Dataset::default(), &timestamp());

        assert!(report.contains("- Total sites: 0"));
        assert!(report.contains("- With logo: 0 (0.0%)"));
    }
}
