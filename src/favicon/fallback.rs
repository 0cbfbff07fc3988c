//! Direct favicon discovery on the site itself

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

use crate::core::constants::timeouts;
use crate::favicon::search::FaviconValidator;
use crate::net::HttpClient;

const ICON_LINK_PATTERNS: [&str; 2] = [
    r#"(?i)<link[^>]*rel=["'](?:shortcut\s+)?icon["'][^>]*href=["']([^"']+)["']"#,
    r#"(?i)<link[^>]*href=["']([^"']+)["'][^>]*rel=["'](?:shortcut\s+)?icon["']"#,
];

static ICON_LINKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ICON_LINK_PATTERNS
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

const PROTOCOLS: [&str; 2] = ["https", "http"];

/// The well-known icon paths, https first
pub fn direct_paths(domain: &str) -> Vec<String> {
    PROTOCOLS
        .iter()
        .flat_map(|protocol| {
            [
                format!("{protocol}://{domain}/favicon.ico"),
                format!("{protocol}://{domain}/favicon.png"),
            ]
        })
        .collect()
}

/// `href`s of `<link rel="icon">` / `<link rel="shortcut icon">` tags in
/// pattern order
pub fn icon_links(html: &str) -> Vec<String> {
    ICON_LINKS
        .iter()
        .flat_map(|regex| regex.captures_iter(html))
        .filter_map(|captures| captures.get(1))
        .map(|href| href.as_str().to_string())
        .collect()
}

/// Resolve an icon `href` against `{protocol}://{domain}`
pub fn resolve_href(href: &str, protocol: &str, domain: &str) -> String {
    if href.starts_with("//") {
        format!("{protocol}:{href}")
    } else if href.starts_with('/') {
        format!("{protocol}://{domain}{href}")
    } else if !href.starts_with("http") {
        format!("{protocol}://{domain}/{href}")
    } else {
        href.to_string()
    }
}

/// Last resort for domains no API knows: try the well-known paths, then
/// read the homepage for an icon link.
pub struct DirectFallback<'a> {
    client: &'a HttpClient,
    path_timeout: Duration,
    link_timeout: Duration,
}

impl<'a> DirectFallback<'a> {
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            path_timeout: Duration::from_secs(timeouts::DIRECT_PROBE_TIMEOUT_SECONDS),
            link_timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub async fn find<V>(
        &self,
        domain: &str,
        validator: &V,
        note: &mut (dyn FnMut(String) + Send),
    ) -> Option<String>
    where
        V: FaviconValidator + ?Sized,
    {
        for path in direct_paths(domain) {
            note(format!("    Checking: {path}"));
            if validator.is_valid(&path, self.path_timeout).await {
                note(format!("    ✅ Direct path works: {path}"));
                return Some(path);
            }
        }

        for protocol in PROTOCOLS {
            let homepage = format!("{protocol}://{domain}");
            let response = match self.client.get(&homepage, self.path_timeout).await {
                Ok(response) => response,
                Err(err) => {
                    debug!("Fetching {homepage} failed: {err}");
                    continue;
                }
            };

            if response.status().as_u16() != 200 {
                continue;
            }

            let html = match response.text().await {
                Ok(html) => html,
                Err(err) => {
                    debug!("Reading {homepage} failed: {err}");
                    continue;
                }
            };

            for href in icon_links(&html) {
                let candidate = resolve_href(&href, protocol, domain);
                note(format!("    Checking icon link: {candidate}"));
                if validator.is_valid(&candidate, self.link_timeout).await {
                    note(format!("    ✅ Icon link works: {candidate}"));
                    return Some(candidate);
                }
            }

            // Only the first homepage that answers is scanned
            break;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::favicon::validate::HttpValidator;
    use mockito::Server;

    #[test]
    fn test_direct_paths__https_before_http() {
        assert_eq!(
            direct_paths("example.cn"),
            vec![
                "https://example.cn/favicon.ico",
                "https://example.cn/favicon.png",
                "http://example.cn/favicon.ico",
                "http://example.cn/favicon.png",
            ]
        );
    }

    #[test]
    fn test_icon_links__both_attribute_orders() {
        let html = r#"<HEAD>
<link rel="stylesheet" href="/main.css">
<LINK REL="shortcut icon" HREF="/static/Favicon.ico">
<link href='//cdn.example.cn/icon.png' rel='icon'>
</HEAD>"#;

        assert_eq!(
            icon_links(html),
            vec!["/static/Favicon.ico", "//cdn.example.cn/icon.png"]
        );
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("//cdn.x.cn/i.png", "https", "x.cn"),
            "https://cdn.x.cn/i.png"
        );
        assert_eq!(resolve_href("/i.png", "http", "x.cn"), "http://x.cn/i.png");
        assert_eq!(
            resolve_href("img/i.png", "https", "x.cn"),
            "https://x.cn/img/i.png"
        );
        assert_eq!(
            resolve_href("https://other.cn/i.png", "http", "x.cn"),
            "https://other.cn/i.png"
        );
    }

    #[tokio::test]
    async fn test_find__uses_homepage_icon_link() {
        let mut server = Server::new_async().await;
        let domain = server.host_with_port();
        let _home = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"<html><head><link rel="icon" href="/assets/logo.png"></head></html>"#)
            .create_async()
            .await;
        let _icon = server
            .mock("HEAD", "/assets/logo.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;
        let _missing = server
            .mock("HEAD", mockito::Matcher::Regex("^/favicon".to_string()))
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new("test", false, 0, Duration::from_millis(1)).unwrap();
        let validator = HttpValidator::new(client.clone());
        let fallback = DirectFallback::new(&client);

        let found = fallback.find(&domain, &validator, &mut |_| {}).await;

        assert_eq!(found, Some(format!("http://{domain}/assets/logo.png")));
    }

    #[tokio::test]
    async fn test_find__prefers_direct_path() {
        let mut server = Server::new_async().await;
        let domain = server.host_with_port();
        let _ico = server
            .mock("HEAD", "/favicon.ico")
            .with_status(200)
            .with_header("content-type", "image/x-icon")
            .create_async()
            .await;

        let client = HttpClient::new("test", false, 0, Duration::from_millis(1)).unwrap();
        let validator = HttpValidator::new(client.clone());

        let found = DirectFallback::new(&client)
            .find(&domain, &validator, &mut |_| {})
            .await;

        assert_eq!(found, Some(format!("http://{domain}/favicon.ico")));
    }
}
