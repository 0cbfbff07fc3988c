//! What a homepage says about itself

use scraper::{Html, Selector};

use crate::core::constants::description::{BODY_TEXT_MAX_CHARS, BODY_TEXT_MIN_CHARS, ELLIPSIS};

/// Text pulled out of one HTML document. Every field is trimmed and `None`
/// when missing or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub og_description: Option<String>,
    pub og_title: Option<String>,
    pub keywords: Option<String>,
    /// Visible body text, whitespace collapsed, cut to 200 characters plus
    /// `...`; only kept when longer than 50 characters
    pub body_text: Option<String>,
}

impl PageInfo {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        Self {
            title: first_text(&document, "title"),
            meta_description: meta_content(&document, r#"meta[name="description"]"#),
            og_description: meta_content(&document, r#"meta[property="og:description"]"#),
            og_title: meta_content(&document, r#"meta[property="og:title"]"#),
            keywords: meta_content(&document, r#"meta[name="keywords"]"#),
            body_text: body_text(&document),
        }
    }

    /// Description sources in priority order
    pub fn candidates(&self) -> [Option<&str>; 5] {
        [
            self.meta_description.as_deref(),
            self.og_description.as_deref(),
            self.og_title.as_deref(),
            self.title.as_deref(),
            self.body_text.as_deref(),
        ]
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    non_empty(&element.text().collect::<String>())
}

/// `content` of the first matching meta tag
fn meta_content(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    non_empty(element.value().attr("content")?)
}

fn body_text(document: &Html) -> Option<String> {
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| matches!(element.name(), "script" | "style"))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    let text = words.join(" ");
    let length = text.chars().count();
    if length <= BODY_TEXT_MIN_CHARS {
        return None;
    }

    if length > BODY_TEXT_MAX_CHARS {
        let cut: String = text.chars().take(BODY_TEXT_MAX_CHARS).collect();
        Some(format!("{cut}{ELLIPSIS}"))
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    const GITHUB: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>
    GitHub · Build and ship software on a single, collaborative platform
  </title>
  <meta name="description" content="The world's leading AI-powered developer platform">
  <meta property="og:description" content="Join the world's most widely adopted developer platform">
  <meta property="og:title" content="GitHub">
  <meta name="keywords" content="git, code, hosting">
  <style>body { color: red; }</style>
</head>
<body><script>var tracking = "should not appear";</script><p>Hello</p></body>
</html>"#;

    #[test]
    fn test_parse__reads_meta_tags() {
        let page = PageInfo::parse(GITHUB);

        assert_eq!(
            page.title.as_deref(),
            Some("GitHub · Build and ship software on a single, collaborative platform")
        );
        assert_eq!(
            page.meta_description.as_deref(),
            Some("The world's leading AI-powered developer platform")
        );
        assert_eq!(
            page.og_description.as_deref(),
            Some("Join the world's most widely adopted developer platform")
        );
        assert_eq!(page.og_title.as_deref(), Some("GitHub"));
        assert_eq!(page.keywords.as_deref(), Some("git, code, hosting"));
    }

    #[test]
    fn test_parse__body_text_excludes_script_and_style() {
        let html = format!(
            "<html><head><style>.x {{}}</style></head><body><script>alert('x')</script><p>{}</p>\n\n<div>  tail   text </div></body></html>",
            "word ".repeat(12)
        );
        let page = PageInfo::parse(&html);

        let body = page.body_text.unwrap();
        assert!(!body.contains("alert"));
        assert!(!body.contains(".x"));
        assert!(body.ends_with("word tail text"));
        assert!(!body.contains("  "));
    }

    #[test]
    fn test_parse__short_body_text_is_dropped() {
        let page = PageInfo::parse("<html><body><p>Just a few words here</p></body></html>");
        assert_eq!(page.body_text, None);
    }

    #[test]
    fn test_parse__long_body_text_is_cut_to_200_chars() {
        let html = format!("<html><body><p>{}</p></body></html>", "界".repeat(300));
        let page = PageInfo::parse(&html);

        let body = page.body_text.unwrap();
        assert_eq!(body.chars().count(), 203);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn test_parse__empty_content_is_none() {
        let page = PageInfo::parse(
            r#"<html><head><title>  </title><meta name="description" content="   "></head></html>"#,
        );
        assert_eq!(page.title, None);
        assert_eq!(page.meta_description, None);
    }

    #[test]
    fn test_candidates__priority_order() {
        let page = PageInfo {
            title: Some("t".into()),
            meta_description: Some("m".into()),
            og_description: Some("od".into()),
            og_title: Some("ot".into()),
            keywords: Some("k".into()),
            body_text: Some("b".into()),
        };
        assert_eq!(
            page.candidates(),
            [Some("m"), Some("od"), Some("ot"), Some("t"), Some("b")]
        );
    }
}
