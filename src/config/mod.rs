//! Configuration management
//!
//! This module handles loading configuration from a TOML file, merging it
//! with CLI arguments and resolving per-tool defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, http, timeouts};
use crate::core::error::{Result, WebstackError};
use crate::favicon::DOMAIN_PLACEHOLDER;
use crate::net::is_extended_timeout_domain;

/// Values read from `.webstack.toml`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset file path
    pub dataset: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Timeout in seconds for the extended-timeout domain class
    pub extended_timeout: Option<u64>,

    /// Retry attempts on 429/5xx (description and favicon fetchers)
    pub retries: Option<u32>,

    /// Backoff base between retries in milliseconds
    pub retry_delay: Option<u64>,

    /// Size of the worker pool
    pub workers: Option<usize>,

    /// Delay in milliseconds after each drained result
    pub pacing_delay: Option<u64>,

    /// Delay in milliseconds between favicon API attempts for one domain
    pub attempt_delay: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Skip TLS certificate verification
    pub insecure: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Favicon API urls with a `{domain}` placeholder, replacing the
    /// built-in lists
    pub favicon_templates: Option<Vec<String>>,
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub dataset: Option<String>,          // --file / --webstack
    pub timeout: Option<u64>,             // --timeout
    pub extended_timeout: Option<u64>,    // --extended-timeout
    pub retries: Option<u32>,             // --retries
    pub workers: Option<usize>,           // --workers / --threads
    pub user_agent: Option<String>,       // --user-agent
    pub insecure: bool,                   // --insecure
    pub verbose: bool,                    // --verbose
    pub quiet: bool,                      // --quiet
    pub no_progress: bool,                // --no-progress
    pub config_file: Option<String>,      // --config
    pub no_config: bool,                  // --no-config
}

/// Defaults that differ between the three tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDefaults {
    pub workers: usize,
    pub pacing_ms: u64,
    pub timeout: u64,
    /// `None` means extended domains get the same timeout as every other host
    pub extended_timeout: Option<u64>,
    pub retries: u32,
}

impl ToolDefaults {
    pub const DESCRIBE: Self = Self {
        workers: defaults::DESCRIBE_WORKERS,
        pacing_ms: defaults::DESCRIBE_PACING_MS,
        timeout: timeouts::DEFAULT_TIMEOUT_SECONDS,
        extended_timeout: None,
        retries: defaults::RETRY_ATTEMPTS,
    };

    pub const LINKCHECK: Self = Self {
        workers: defaults::LINKCHECK_THREADS,
        pacing_ms: defaults::LINKCHECK_PACING_MS,
        timeout: timeouts::DEFAULT_TIMEOUT_SECONDS,
        extended_timeout: Some(timeouts::LINKCHECK_EXTENDED_TIMEOUT_SECONDS),
        retries: 0,
    };

    pub const LOGO: Self = Self {
        workers: defaults::LOGO_THREADS,
        pacing_ms: defaults::LOGO_PACING_MS,
        timeout: timeouts::DEFAULT_TIMEOUT_SECONDS,
        extended_timeout: Some(timeouts::FAVICON_EXTENDED_TIMEOUT_SECONDS),
        retries: defaults::RETRY_ATTEMPTS,
    };
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset: PathBuf,
    pub timeout: Duration,
    pub extended_timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub workers: usize,
    pub pacing: Duration,
    pub attempt_delay: Duration,
    pub user_agent: String,
    pub insecure: bool,
    pub verbose: bool,
    pub favicon_templates: Option<Vec<String>>,
}

impl Settings {
    /// Per-request timeout for a url or domain
    pub fn timeout_for(&self, url_or_domain: &str) -> Duration {
        if is_extended_timeout_domain(url_or_domain) {
            self.extended_timeout
        } else {
            self.timeout
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WebstackError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            WebstackError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Pick the config source the CLI asks for: none, an explicit file, or
    /// the standard locations.
    pub fn from_cli(cli_config: &CliConfig) -> Result<Self> {
        let mut config = if cli_config.no_config {
            Self::default()
        } else if let Some(ref config_file) = cli_config.config_file {
            Self::load_from_file(config_file)?
        } else {
            Self::load_from_standard_locations()
        };

        config.merge_with_cli(cli_config);
        config.validate()?;
        Ok(config)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref dataset) = cli_config.dataset {
            self.dataset = Some(dataset.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(extended_timeout) = cli_config.extended_timeout {
            self.extended_timeout = Some(extended_timeout);
        }
        if let Some(retries) = cli_config.retries {
            self.retries = Some(retries);
        }
        if let Some(workers) = cli_config.workers {
            self.workers = Some(workers);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.insecure {
            self.insecure = Some(true);
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("Timeout", self.timeout),
            ("Extended timeout", self.extended_timeout),
        ] {
            if let Some(seconds) = value {
                if seconds == 0 {
                    return Err(WebstackError::Config(format!(
                        "{name} cannot be 0. Expected a positive integer representing seconds."
                    )));
                }
                if seconds > timeouts::MAX_TIMEOUT_SECONDS {
                    return Err(WebstackError::Config(format!(
                        "{name} of {seconds} seconds is extremely large (>24 hours). Consider using a smaller value."
                    )));
                }
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(WebstackError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > defaults::MAX_WORKERS {
                return Err(WebstackError::Config(format!(
                    "Worker count of {workers} would hammer the target sites. Expected at most {}.",
                    defaults::MAX_WORKERS
                )));
            }
        }

        if let Some(retries) = self.retries
            && retries > defaults::MAX_RETRY_ATTEMPTS
        {
            return Err(WebstackError::Config(format!(
                "Retry attempts of {retries} is very high and may cause long delays. Expected at most {}.",
                defaults::MAX_RETRY_ATTEMPTS
            )));
        }

        if let Some(ref user_agent) = self.user_agent
            && user_agent.trim().is_empty()
        {
            return Err(WebstackError::Config(
                "User agent cannot be empty.".to_string(),
            ));
        }

        if let Some(ref templates) = self.favicon_templates {
            if templates.is_empty() {
                return Err(WebstackError::Config(
                    "Favicon templates cannot be empty. Remove the key to use the built-in APIs."
                        .to_string(),
                ));
            }
            if let Some(template) = templates.iter().find(|t| !t.contains(DOMAIN_PLACEHOLDER)) {
                return Err(WebstackError::Config(format!(
                    "Favicon template '{template}' has no {DOMAIN_PLACEHOLDER} placeholder."
                )));
            }
        }

        Ok(())
    }

    /// Resolve every value, falling back to the tool's defaults
    pub fn settings(&self, tool: ToolDefaults) -> Settings {
        let timeout = self.timeout.unwrap_or(tool.timeout);
        let extended_timeout = self
            .extended_timeout
            .or(tool.extended_timeout)
            .unwrap_or(timeout);

        Settings {
            dataset: PathBuf::from(self.dataset.as_deref().unwrap_or(defaults::DATASET_PATH)),
            timeout: Duration::from_secs(timeout),
            extended_timeout: Duration::from_secs(extended_timeout),
            retries: self.retries.unwrap_or(tool.retries),
            retry_delay: Duration::from_millis(
                self.retry_delay.unwrap_or(timeouts::DEFAULT_RETRY_DELAY_MS),
            ),
            workers: self.workers.unwrap_or(tool.workers),
            pacing: Duration::from_millis(self.pacing_delay.unwrap_or(tool.pacing_ms)),
            attempt_delay: Duration::from_millis(
                self.attempt_delay.unwrap_or(defaults::LOGO_ATTEMPT_DELAY_MS),
            ),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| http::BROWSER_USER_AGENT.to_string()),
            insecure: self.insecure.unwrap_or(false),
            verbose: self.verbose.unwrap_or(false),
            favicon_templates: self.favicon_templates.clone(),
        }
    }
}
