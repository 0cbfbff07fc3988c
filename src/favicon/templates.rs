//! Third-party favicon APIs, in order of preference

use crate::net::is_extended_timeout_domain;

/// Placeholder substituted with the bare domain
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

pub const GENERAL_TEMPLATES: [&str; 7] = [
    "https://api.iowen.cn/favicon/{domain}.png",
    "https://t2.gstatic.com/faviconV2?client=SOCIAL&type=FAVICON&fallback_opts=TYPE,SIZE,URL&url=https://{domain}&size=128",
    "https://www.google.com/s2/favicons?sz=128&domain={domain}",
    "https://favicons.githubusercontent.com/{domain}",
    "https://icons.duckduckgo.com/ip3/{domain}.ico",
    "https://favicon.im/{domain}?larger=true",
    "https://api.faviconkit.com/{domain}/128",
];

/// For the extended-timeout (mainland China) domain class
pub const EXTENDED_TEMPLATES: [&str; 7] = [
    "https://statics.dnspod.cn/proxy_favicon/_/favicon?domain={domain}",
    "https://api.iowen.cn/favicon/{domain}.png",
    "https://favicon.link/f/{domain}",
    "https://icon.horse/icon/{domain}?size=large",
    "https://t2.gstatic.com/faviconV2?client=SOCIAL&type=FAVICON&fallback_opts=TYPE,SIZE,URL&url=https://{domain}&size=128",
    "https://www.google.com/s2/favicons?sz=128&domain={domain}",
    "https://api.faviconkit.com/{domain}/128",
];

pub fn templates_for(domain: &str) -> &'static [&'static str] {
    if is_extended_timeout_domain(domain) {
        &EXTENDED_TEMPLATES
    } else {
        &GENERAL_TEMPLATES
    }
}

/// Substitute `domain` into every template
pub fn expand(templates: &[&str], domain: &str) -> Vec<String> {
    templates
        .iter()
        .map(|template| template.replace(DOMAIN_PLACEHOLDER, domain))
        .collect()
}

/// Candidate favicon urls for a domain, in the order they are tried
pub fn candidates_for(domain: &str) -> Vec<String> {
    expand(templates_for(domain), domain)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_templates_for__general_domain() {
        let candidates = candidates_for("github.com");

        assert_eq!(candidates.len(), 7);
        assert_eq!(candidates[0], "https://api.iowen.cn/favicon/github.com.png");
        assert_eq!(candidates[6], "https://api.faviconkit.com/github.com/128");
    }

    #[test]
    fn test_templates_for__extended_domain() {
        let candidates = candidates_for("www.gov.cn");

        assert_eq!(
            candidates[0],
            "https://statics.dnspod.cn/proxy_favicon/_/favicon?domain=www.gov.cn"
        );
        assert_eq!(candidates[3], "https://icon.horse/icon/www.gov.cn?size=large");
    }

    #[test]
    fn test_every_template_has_placeholder() {
        for template in GENERAL_TEMPLATES.iter().chain(EXTENDED_TEMPLATES.iter()) {
            assert!(template.contains(DOMAIN_PLACEHOLDER), "{template}");
        }
    }

    #[test]
    fn test_expand__replaces_every_occurrence() {
        let expanded = expand(&["http://{domain}/a?d={domain}"], "example.org");
        assert_eq!(expanded, vec!["http://example.org/a?d=example.org"]);
    }
}
