use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Method, Response};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Settings;
use crate::core::constants::{defaults, http};
use crate::core::error::{Result, WebstackError};

/// Shared HTTP client with browser-like headers and retry/backoff.
///
/// Every request carries its own timeout. Requests answered with a
/// retryable status (429/5xx) or failing at the connection level are
/// retried up to `retries` times, waiting `retry_delay * 2^attempt`
/// between attempts.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    retries: u32,
    retry_delay: Duration,
}

impl HttpClient {
    pub fn new(
        user_agent: &str,
        insecure: bool,
        retries: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(http::ACCEPT_HTML));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(http::ACCEPT_LANGUAGE),
        );
        headers.insert(header::DNT, HeaderValue::from_static("1"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(Policy::limited(http::MAX_REDIRECTS))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60));

        if insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| WebstackError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            retries,
            retry_delay,
        })
    }

    /// Build the client described by resolved run settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.user_agent,
            settings.insecure,
            settings.retries,
            settings.retry_delay,
        )
    }

    /// Same connection pool, different retry budget
    pub fn with_retries(&self, retries: u32) -> Self {
        Self {
            inner: self.inner.clone(),
            retries,
            retry_delay: self.retry_delay,
        }
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub async fn get(&self, url: &str, timeout: Duration) -> reqwest::Result<Response> {
        self.send(Method::GET, url, timeout).await
    }

    pub async fn head(&self, url: &str, timeout: Duration) -> reqwest::Result<Response> {
        self.send(Method::HEAD, url, timeout).await
    }

    /// Send one request, retrying as configured. The last response or error
    /// is returned once the retry budget is spent.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        timeout: Duration,
    ) -> reqwest::Result<Response> {
        let mut attempt = 0;

        loop {
            let result = self
                .inner
                .request(method.clone(), url)
                .timeout(timeout)
                .send()
                .await;

            let retryable = match &result {
                Ok(response) => is_retryable_status(response.status().as_u16()),
                Err(err) => err.is_connect() || err.is_timeout(),
            };

            if !retryable || attempt >= self.retries {
                return result;
            }

            let delay = self.backoff(attempt);
            debug!(
                "Retrying {method} {url} in {}ms (attempt {}/{})",
                delay.as_millis(),
                attempt + 1,
                self.retries
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    defaults::RETRY_STATUS_CODES.contains(&status)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn client(retries: u32) -> HttpClient {
        HttpClient::new("webstack-test/1.0", false, retries, Duration::from_millis(1)).unwrap()
    }

    #[test]
    fn test_is_retryable_status() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status));
        }
        for status in [200, 301, 404, 501] {
            assert!(!is_retryable_status(status));
        }
    }

    #[test]
    fn test_backoff__doubles_per_attempt() {
        let client = HttpClient::new("ua", false, 3, Duration::from_millis(100)).unwrap();
        assert_eq!(client.backoff(0), Duration::from_millis(100));
        assert_eq!(client.backoff(1), Duration::from_millis(200));
        assert_eq!(client.backoff(2), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_get__sends_browser_headers() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "webstack-test/1.0")
            .match_header("accept-language", http::ACCEPT_LANGUAGE)
            .match_header("dnt", "1")
            .with_status(200)
            .create_async()
            .await;

        let response = client(0).get(&server.url(), Duration::from_secs(5)).await?;

        assert_eq!(response.status().as_u16(), 200);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get__when_503__retries_until_budget_spent() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/busy")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let response = client(2)
            .get(&format!("{}/busy", server.url()), Duration::from_secs(5))
            .await?;

        assert_eq!(response.status().as_u16(), 503);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_get__when_404__does_not_retry() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let response = client(3)
            .get(&format!("{}/missing", server.url()), Duration::from_secs(5))
            .await?;

        assert_eq!(response.status().as_u16(), 404);
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_head__uses_head_method() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/icon.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .create_async()
            .await;

        let response = client(0)
            .head(&format!("{}/icon.png", server.url()), Duration::from_secs(5))
            .await?;

        assert_eq!(response.status().as_u16(), 200);
        mock.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_with_retries__overrides_budget() {
        let client = client(3).with_retries(0);
        assert_eq!(client.retries(), 0);
    }
}
