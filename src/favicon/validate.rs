use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::core::constants::favicon::{
    AMBIGUOUS_CONTENT_TYPES, ERROR_INDICATORS, HIGH_QUALITY_BYTES, IMAGE_CONTENT_TYPES,
    LOW_QUALITY_BYTES, MAX_ERROR_PAGE_BYTES,
};
use crate::core::constants::timeouts;
use crate::favicon::search::FaviconValidator;
use crate::net::HttpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// What a HEAD request says about a logo url
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityInfo {
    pub valid: bool,
    pub url: String,
    pub content_type: Option<String>,
    /// `Content-Length` in bytes, when the server sent one
    pub file_size: Option<u64>,
    pub error: Option<String>,
}

impl QualityInfo {
    pub fn invalid(url: &str, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            url: url.to_string(),
            content_type: None,
            file_size: None,
            error: Some(error.into()),
        }
    }

    /// Size in bytes, ignoring an explicit zero
    pub fn known_size(&self) -> Option<u64> {
        self.file_size.filter(|size| *size > 0)
    }

    /// `None` for invalid logos
    pub fn level(&self) -> Option<QualityLevel> {
        if !self.valid {
            return None;
        }
        Some(match self.known_size() {
            Some(size) if size < LOW_QUALITY_BYTES => QualityLevel::Low,
            Some(size) if size > HIGH_QUALITY_BYTES => QualityLevel::High,
            _ => QualityLevel::Medium,
        })
    }

    pub fn warning(&self) -> Option<&'static str> {
        (self.level() == Some(QualityLevel::Low))
            .then_some("File is very small, probably a low-quality icon")
    }
}

fn header_text(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Whether a response body looks like an error page instead of an icon
pub fn looks_like_error_page(body: &[u8]) -> bool {
    if body.len() > MAX_ERROR_PAGE_BYTES {
        return true;
    }
    let text = String::from_utf8_lossy(body).to_lowercase();
    ERROR_INDICATORS
        .iter()
        .any(|indicator| text.contains(indicator))
}

/// Validator backed by real HTTP requests
#[derive(Debug, Clone)]
pub struct HttpValidator {
    client: HttpClient,
    quality_timeout: Duration,
}

impl HttpValidator {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            quality_timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    async fn inspect_body(&self, url: &str, timeout: Duration) -> bool {
        let response = match self.client.get(url, timeout).await {
            Ok(response) => response,
            Err(err) => {
                debug!("GET {url} failed: {err}");
                return false;
            }
        };

        if response.status().as_u16() != 200 {
            return false;
        }

        match response.bytes().await {
            Ok(body) => !looks_like_error_page(&body),
            Err(err) => {
                debug!("Reading {url} failed: {err}");
                false
            }
        }
    }
}

#[async_trait]
impl FaviconValidator for HttpValidator {
    /// HEAD must answer 200. Image types pass; JSON or HTML answers are
    /// fetched and rejected when they read like an error page; anything
    /// else passes.
    async fn is_valid(&self, url: &str, timeout: Duration) -> bool {
        let response = match self.client.head(url, timeout).await {
            Ok(response) => response,
            Err(err) => {
                debug!("HEAD {url} failed: {err}");
                return false;
            }
        };

        if response.status().as_u16() != 200 {
            return false;
        }

        let content_type = header_text(response.headers(), CONTENT_TYPE)
            .unwrap_or_default()
            .to_lowercase();

        if IMAGE_CONTENT_TYPES
            .iter()
            .any(|image| content_type.contains(image))
        {
            return true;
        }

        if AMBIGUOUS_CONTENT_TYPES
            .iter()
            .any(|ambiguous| content_type.contains(ambiguous))
        {
            return self.inspect_body(url, timeout).await;
        }

        true
    }

    async fn quality(&self, url: &str) -> QualityInfo {
        let response = match self.client.head(url, self.quality_timeout).await {
            Ok(response) => response,
            Err(err) => return QualityInfo::invalid(url, err.to_string()),
        };

        if response.status().as_u16() != 200 {
            return QualityInfo::invalid(url, "HTTP error");
        }

        let headers = response.headers();
        QualityInfo {
            valid: true,
            url: url.to_string(),
            content_type: header_text(headers, CONTENT_TYPE),
            file_size: header_text(headers, CONTENT_LENGTH).and_then(|len| len.trim().parse().ok()),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;

    fn validator() -> HttpValidator {
        HttpValidator::new(HttpClient::new("test", false, 0, Duration::from_millis(1)).unwrap())
    }

    fn info(size: Option<u64>) -> QualityInfo {
        QualityInfo {
            valid: true,
            url: "https://x/icon.png".to_string(),
            content_type: Some("image/png".to_string()),
            file_size: size,
            error: None,
        }
    }

    #[test]
    fn test_quality_level__buckets() {
        assert_eq!(info(Some(200)).level(), Some(QualityLevel::Low));
        assert_eq!(info(Some(500)).level(), Some(QualityLevel::Medium));
        assert_eq!(info(Some(50_000)).level(), Some(QualityLevel::Medium));
        assert_eq!(info(Some(50_001)).level(), Some(QualityLevel::High));
        assert_eq!(info(None).level(), Some(QualityLevel::Medium));
        assert_eq!(info(Some(0)).level(), Some(QualityLevel::Medium));
        assert_eq!(QualityInfo::invalid("u", "e").level(), None);
    }

    #[test]
    fn test_quality_warning__only_for_low() {
        assert!(info(Some(100)).warning().is_some());
        assert!(info(Some(5_000)).warning().is_none());
    }

    #[test]
    fn test_looks_like_error_page() {
        assert!(looks_like_error_page(b"{\"error\": \"no icon\"}"));
        assert!(looks_like_error_page("<h1>页面不存在</h1>".as_bytes()));
        assert!(looks_like_error_page(&vec![b'a'; MAX_ERROR_PAGE_BYTES + 1]));
        assert!(!looks_like_error_page(b"{\"icon\": \"ok\"}"));
    }

    #[tokio::test]
    async fn test_is_valid__image_content_type_passes() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("HEAD", "/icon.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;

        let url = format!("{}/icon.png", server.url());
        assert!(validator().is_valid(&url, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_is_valid__non_200_head_fails() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("HEAD", "/missing.ico")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing.ico", server.url());
        assert!(!validator().is_valid(&url, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_is_valid__json_error_body_fails() {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/api")
            .with_status(200)
            .with_header("content-type", "application/json")
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/api")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": 404, "message": "Not Found"}"#)
            .create_async()
            .await;

        let url = format!("{}/api", server.url());
        assert!(!validator().is_valid(&url, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_is_valid__clean_html_body_passes() {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/icon")
            .with_status(200)
            .with_header("content-type", "text/html")
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/icon")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<svg></svg>")
            .create_async()
            .await;

        let url = format!("{}/icon", server.url());
        assert!(validator().is_valid(&url, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_is_valid__ambiguous_get_non_200_fails() {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/flaky")
            .with_status(200)
            .with_header("content-type", "text/html")
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/flaky")
            .with_status(404)
            .with_body("<svg></svg>")
            .create_async()
            .await;

        let url = format!("{}/flaky", server.url());
        assert!(!validator().is_valid(&url, Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_quality__reports_content_type() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("HEAD", "/icon.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;

        let url = format!("{}/icon.png", server.url());
        let quality = validator().quality(&url).await;

        assert!(quality.valid);
        assert_eq!(quality.content_type.as_deref(), Some("image/png"));
        assert_eq!(quality.url, url);
    }

    #[tokio::test]
    async fn test_quality__http_error_is_invalid() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("HEAD", "/gone.png")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/gone.png", server.url());
        let quality = validator().quality(&url).await;

        assert!(!quality.valid);
        assert_eq!(quality.error.as_deref(), Some("HTTP error"));
    }
}
