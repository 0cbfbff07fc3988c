use std::time::Duration;

use crate::config::Settings;
use crate::favicon::fallback::DirectFallback;
use crate::favicon::search::{FaviconValidator, SearchOptions, best_match, first_match};
use crate::favicon::templates::{expand, templates_for};
use crate::favicon::validate::{HttpValidator, QualityInfo};
use crate::net::{HttpClient, is_extended_timeout_domain};

/// Finds a favicon url for a domain through the template APIs, falling back
/// to the site itself for extended-class domains.
#[derive(Debug, Clone)]
pub struct FaviconResolver {
    client: HttpClient,
    validator: HttpValidator,
    timeout: Duration,
    extended_timeout: Duration,
    attempt_delay: Duration,
    templates: Option<Vec<String>>,
}

impl FaviconResolver {
    pub fn new(client: HttpClient, settings: &Settings) -> Self {
        Self {
            validator: HttpValidator::new(client.clone()),
            client,
            timeout: settings.timeout,
            extended_timeout: settings.extended_timeout,
            attempt_delay: settings.attempt_delay,
            templates: settings.favicon_templates.clone(),
        }
    }

    /// Replace the built-in API lists with custom `{domain}` templates
    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn candidates(&self, domain: &str) -> Vec<String> {
        match self.templates {
            Some(ref templates) => {
                let templates: Vec<&str> = templates.iter().map(String::as_str).collect();
                expand(&templates, domain)
            }
            None => expand(templates_for(domain), domain),
        }
    }

    fn options(&self, domain: &str) -> SearchOptions {
        SearchOptions {
            timeout: if is_extended_timeout_domain(domain) {
                self.extended_timeout
            } else {
                self.timeout
            },
            attempt_delay: self.attempt_delay,
        }
    }

    /// First passing candidate, then the direct fallback for extended-class
    /// domains
    pub async fn resolve(&self, domain: &str, note: &mut (dyn FnMut(String) + Send)) -> Option<String> {
        if domain.is_empty() {
            return None;
        }

        let extended = is_extended_timeout_domain(domain);
        if extended {
            note("  🇨🇳 Extended-timeout domain, using the dedicated API list".to_string());
        }

        let candidates = self.candidates(domain);
        if let Some(found) = first_match(&candidates, &self.validator, self.options(domain), note).await {
            return Some(found);
        }

        if extended {
            note("  🔄 Trying the site itself...".to_string());
            if let Some(found) = DirectFallback::new(&self.client)
                .find(domain, &self.validator, note)
                .await
            {
                return Some(found);
            }
        }

        note("  ❌ No usable favicon found".to_string());
        None
    }

    /// Highest-scoring candidate; falls back to [`resolve`](Self::resolve)
    /// when none scores
    pub async fn resolve_best(
        &self,
        domain: &str,
        note: &mut (dyn FnMut(String) + Send),
    ) -> Option<String> {
        if domain.is_empty() {
            return None;
        }

        let candidates = self.candidates(domain);
        if let Some(best) = best_match(&candidates, &self.validator, self.options(domain), note).await {
            note(format!("  🎉 Selected: {} (score: {})", best.url, best.score));
            return Some(best.url);
        }

        note("  🔄 No high-quality favicon, trying the standard search...".to_string());
        self.resolve(domain, &mut |_| {}).await
    }

    pub async fn quality(&self, url: &str) -> QualityInfo {
        self.validator.quality(url).await
    }

    pub async fn is_valid(&self, url: &str, timeout: Duration) -> bool {
        self.validator.is_valid(url, timeout).await
    }
}
