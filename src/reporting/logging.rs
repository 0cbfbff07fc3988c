use log::{debug, error, info, warn};
use std::path::Path;

use crate::config::Settings;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // A second initialisation (tests, library callers) keeps the first logger
    if let Err(err) = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init()
    {
        debug!("Keeping the existing logger: {err}");
    }

    debug!("Logger initialized with level: {level:?}");
}

/// Log the resolved run settings
pub fn log_settings(tool: &str, settings: &Settings) {
    info!(
        "{tool}: dataset={}, workers={}, pacing={}ms",
        settings.dataset.display(),
        settings.workers,
        settings.pacing.as_millis()
    );
    info!(
        "Timeouts: default={}s, extended={}s",
        settings.timeout.as_secs(),
        settings.extended_timeout.as_secs()
    );
    info!(
        "Retry: attempts={}, delay={}ms",
        settings.retries,
        settings.retry_delay.as_millis()
    );
    info!("HTTP: insecure={}", settings.insecure);
}

/// Log how much work a run found
pub fn log_run_start(tool: &str, items: usize, workers: usize) {
    info!("{tool}: starting {items} item(s) with {workers} worker(s)");
}

/// Log one finished work item for debugging
pub fn log_item_result(url: &str, outcome: &str) {
    debug!("{url} -> {outcome}");
}

/// Log run completion
pub fn log_run_complete(tool: &str, succeeded: usize, total: usize, duration_ms: u128) {
    if succeeded == total {
        info!("✅ {tool} complete: {succeeded}/{total} succeeded ({duration_ms}ms)");
    } else {
        warn!(
            "❌ {tool} complete: {succeeded}/{total} succeeded, {} failed ({duration_ms}ms)",
            total - succeeded
        );
    }
}

/// Log a dataset write failure
pub fn log_save_failure<P: AsRef<Path>>(path: P, err: &dyn std::error::Error) {
    error!("Could not save {}: {err}", path.as_ref().display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
