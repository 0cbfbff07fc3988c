// Command-line interface definitions for the three webstack tools

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

/// Fill in missing link descriptions from each site's homepage
#[derive(Parser, Debug)]
#[command(name = "webstack-describe", author, version, about, long_about = None)]
pub struct DescribeCli {
    // Core Options
    /// Dataset file (default: data/webstack.yml)
    #[arg(short = 'f', long, value_name = "FILE", help_heading = "Core Options")]
    pub file: Option<String>,

    /// Request timeout in seconds (default: 10)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Core Options")]
    pub timeout: Option<u64>,

    /// Retry attempts on 429/5xx (default: 3)
    #[arg(short = 'r', long, value_name = "COUNT", help_heading = "Core Options")]
    pub retries: Option<u32>,

    /// Concurrent workers (default: 5)
    #[arg(short = 'w', long, value_name = "COUNT", help_heading = "Core Options")]
    pub workers: Option<usize>,

    /// Regenerate every description, not only the missing ones
    #[arg(long, help_heading = "Core Options")]
    pub all: bool,

    /// Print the description for one url and exit without touching the dataset
    #[arg(long, value_name = "URL", help_heading = "Core Options")]
    pub test_url: Option<String>,

    // Output & Verbosity
    /// Suppress per-link output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Check every link in the dataset and write a report
#[derive(Parser, Debug)]
#[command(name = "webstack-linkcheck", author, version, about, long_about = None)]
pub struct LinkcheckCli {
    // Core Options
    /// Dataset file (default: data/webstack.yml)
    #[arg(short = 'f', long, value_name = "FILE", help_heading = "Core Options")]
    pub webstack: Option<String>,

    /// Concurrent requests (default: 3)
    #[arg(long, value_name = "COUNT", help_heading = "Core Options")]
    pub threads: Option<usize>,

    /// Request timeout in seconds (default: 10)
    #[arg(long, value_name = "SECONDS", help_heading = "Core Options")]
    pub timeout: Option<u64>,

    /// Timeout in seconds for .cn domains (default: 20)
    #[arg(long, value_name = "SECONDS", help_heading = "Core Options")]
    pub extended_timeout: Option<u64>,

    // Output & Verbosity
    /// Report format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, default_value = output_formats::DEFAULT, help_heading = "Output & Verbosity")]
    pub format: String,

    /// Report path (default: results/link_check_report.<ext>)
    #[arg(short = 'o', long, value_name = "PATH", help_heading = "Output & Verbosity")]
    pub output: Option<String>,

    /// Suppress progress output and the console summary
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Print the failed links after the run
    #[arg(long, help_heading = "Output & Verbosity")]
    pub failed_only: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Find and maintain site logos through third-party favicon APIs
#[derive(Parser, Debug)]
#[command(name = "webstack-logo", author, version, about, long_about = None)]
pub struct LogoCli {
    #[command(subcommand)]
    pub command: LogoCommand,

    /// Dataset file (default: data/webstack.yml)
    #[arg(short = 'f', long, value_name = "FILE", global = true)]
    pub webstack: Option<String>,

    /// Concurrent domains (default: 3)
    #[arg(long, value_name = "COUNT", global = true)]
    pub threads: Option<usize>,

    /// Request timeout in seconds (default: 10)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LogoCommand {
    /// Find a favicon for a url or domain and copy it to the clipboard
    Get {
        /// Target url or domain
        target: String,
    },
    /// Like `get`, but score every candidate and keep the best one
    #[command(name = "get-hq")]
    GetHq {
        /// Target url or domain
        target: String,
    },
    /// Check availability and quality of a logo url
    Check {
        /// Logo url
        url: String,
    },
    /// List entries without a logo
    Scan,
    /// Fetch logos for every entry without one and save the dataset
    Update {
        /// Preview the work and ask for confirmation first
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate existing logos and clear the broken ones
    Verify,
    /// Write a Markdown logo status report
    Report {
        /// Report path (default: results/logo_status_report.md)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,
    },
}

impl LogoCommand {
    /// Whether the command reads the dataset
    pub fn needs_dataset(&self) -> bool {
        matches!(
            self,
            Self::Scan | Self::Update { .. } | Self::Verify | Self::Report { .. }
        )
    }
}

pub fn describe_to_config(cli: &DescribeCli) -> CliConfig {
    CliConfig {
        dataset: cli.file.clone(),
        timeout: cli.timeout,
        retries: cli.retries,
        workers: cli.workers,
        user_agent: cli.user_agent.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    }
}

pub fn linkcheck_to_config(cli: &LinkcheckCli) -> CliConfig {
    CliConfig {
        dataset: cli.webstack.clone(),
        timeout: cli.timeout,
        extended_timeout: cli.extended_timeout,
        workers: cli.threads,
        user_agent: cli.user_agent.clone(),
        insecure: cli.insecure,
        verbose: cli.verbose,
        quiet: cli.quiet,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    }
}

pub fn logo_to_config(cli: &LogoCli) -> CliConfig {
    CliConfig {
        dataset: cli.webstack.clone(),
        timeout: cli.timeout,
        workers: cli.threads,
        user_agent: cli.user_agent.clone(),
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    }
}
