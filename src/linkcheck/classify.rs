use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::core::constants::display;

/// Health of one link after a single GET
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Success,
    Redirect,
    HttpError,
    Timeout,
    SslError,
    DnsError,
    ConnectionError,
    InvalidUrl,
    UnknownError,
}

impl LinkStatus {
    pub fn from_status_code(code: u16) -> Self {
        match code {
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            _ => Self::HttpError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Redirect => "redirect",
            Self::HttpError => "http_error",
            Self::Timeout => "timeout",
            Self::SslError => "ssl_error",
            Self::DnsError => "dns_error",
            Self::ConnectionError => "connection_error",
            Self::InvalidUrl => "invalid_url",
            Self::UnknownError => "unknown_error",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Success => display::SUCCESS_EMOJI,
            Self::Redirect => display::REDIRECT_EMOJI,
            Self::HttpError => display::ERROR_EMOJI,
            Self::Timeout => display::TIMEOUT_EMOJI,
            Self::SslError => display::SSL_EMOJI,
            Self::DnsError => display::DNS_EMOJI,
            Self::ConnectionError => display::CONNECTION_EMOJI,
            Self::InvalidUrl => display::INVALID_EMOJI,
            Self::UnknownError => display::UNKNOWN_EMOJI,
        }
    }

    /// Success and redirect count as reachable; everything else is a
    /// failed link.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success | Self::Redirect)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TLS_MARKERS: [&str; 4] = ["certificate", "tls", "ssl", "handshake"];
const DNS_MARKERS: [&str; 5] = [
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

/// Classify a transport-level failure from its flags and error chain text.
pub fn classify_failure(is_timeout: bool, is_connect: bool, chain: &str) -> LinkStatus {
    let chain = chain.to_lowercase();

    if is_timeout {
        LinkStatus::Timeout
    } else if TLS_MARKERS.iter().any(|marker| chain.contains(marker)) {
        LinkStatus::SslError
    } else if DNS_MARKERS.iter().any(|marker| chain.contains(marker)) {
        LinkStatus::DnsError
    } else if is_connect {
        LinkStatus::ConnectionError
    } else {
        LinkStatus::UnknownError
    }
}

/// Only the causes are inspected; reqwest's own message carries the request
/// url, which must never decide the class.
pub fn classify_error(err: &reqwest::Error) -> LinkStatus {
    let causes = err
        .source()
        .map(|inner| error_chain(inner))
        .unwrap_or_default();
    classify_failure(err.is_timeout(), err.is_connect(), &causes)
}

/// The error and all of its sources, joined with `": "`
pub fn error_chain(err: &dyn Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_from_status_code() {
        assert_eq!(LinkStatus::from_status_code(200), LinkStatus::Success);
        assert_eq!(LinkStatus::from_status_code(204), LinkStatus::Success);
        assert_eq!(LinkStatus::from_status_code(301), LinkStatus::Redirect);
        assert_eq!(LinkStatus::from_status_code(404), LinkStatus::HttpError);
        assert_eq!(LinkStatus::from_status_code(503), LinkStatus::HttpError);
        assert_eq!(LinkStatus::from_status_code(101), LinkStatus::HttpError);
    }

    #[test]
    fn test_classify_failure__timeout_wins() {
        assert_eq!(
            classify_failure(true, true, "tls handshake eof"),
            LinkStatus::Timeout
        );
    }

    #[test]
    fn test_classify_failure__tls_errors() {
        assert_eq!(
            classify_failure(false, true, "error sending request: invalid peer certificate: Expired"),
            LinkStatus::SslError
        );
    }

    #[test]
    fn test_classify_failure__dns_errors() {
        assert_eq!(
            classify_failure(
                false,
                true,
                "client error (Connect): dns error: failed to lookup address information: Name or service not known"
            ),
            LinkStatus::DnsError
        );
    }

    #[test]
    fn test_classify_failure__connection_and_unknown() {
        assert_eq!(
            classify_failure(false, true, "Connection refused (os error 111)"),
            LinkStatus::ConnectionError
        );
        assert_eq!(
            classify_failure(false, false, "error decoding response body"),
            LinkStatus::UnknownError
        );
    }

    #[test]
    fn test_status_display_and_emoji() {
        assert_eq!(LinkStatus::SslError.to_string(), "ssl_error");
        assert_eq!(LinkStatus::Timeout.emoji(), "⏰");
        assert_eq!(LinkStatus::InvalidUrl.emoji(), "🚫");
        assert!(LinkStatus::Redirect.is_ok());
        assert!(!LinkStatus::DnsError.is_ok());
    }

    #[test]
    fn test_status_serializes_snake_case() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&LinkStatus::ConnectionError)?,
            "\"connection_error\""
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_classify_error__url_text_does_not_mark_tls() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/ssl-setup-guide")
            .send()
            .await
            .unwrap_err();

        assert_eq!(classify_error(&err), LinkStatus::ConnectionError);
    }

    #[test]
    fn test_error_chain__includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "inner cause");
        let outer = crate::core::error::WebstackError::Io(inner);
        let chain = error_chain(&outer);
        assert!(chain.contains("inner cause"));
    }
}
