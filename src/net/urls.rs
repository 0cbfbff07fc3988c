use url::Url;

use crate::core::constants::domains::EXTENDED_TIMEOUT_SUFFIXES;

/// Trim the url, prepend `https://` when it has no http(s) scheme and parse
/// it. Returns `None` when the result is not an absolute url with a host.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// Lower-cased host with a leading `www.` removed, keeping an explicit port.
///
/// ```
/// use webstack_tools::net::extract_domain;
///
/// assert_eq!(extract_domain("https://WWW.Example.com/x").as_deref(), Some("example.com"));
/// ```
pub fn extract_domain(raw: &str) -> Option<String> {
    let url = normalize_url(raw)?;
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        return None;
    }

    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// The authority part of the url exactly as written (host and port, no
/// user info).
pub fn authority(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let rest = match trimmed.find("://") {
        Some(pos) => &trimmed[pos + 3..],
        None => trimmed,
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let authority = authority.rsplit('@').next().unwrap_or(authority);

    (!authority.is_empty()).then(|| authority.to_string())
}

/// Whether the host (of a domain or a full url) belongs to the class of
/// slow mainland-China domains that get longer timeouts and their own
/// favicon API list.
pub fn is_extended_timeout_domain(domain_or_url: &str) -> bool {
    let host = if domain_or_url.contains("://") {
        match Url::parse(domain_or_url.trim()) {
            Ok(url) => url.host_str().unwrap_or_default().to_lowercase(),
            Err(_) => return false,
        }
    } else {
        let host = domain_or_url.trim();
        let host = host.split(['/', ':']).next().unwrap_or(host);
        host.to_lowercase()
    };
    let host = host.trim_end_matches('.');

    EXTENDED_TIMEOUT_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
}
