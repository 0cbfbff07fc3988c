use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use webstack_tools::config::{Config, ToolDefaults};
use webstack_tools::core::constants::{defaults, output_formats};
use webstack_tools::dataset::{self, WorkFilter, enumerate};
use webstack_tools::linkcheck::check_links;
use webstack_tools::net::HttpClient;
use webstack_tools::reporting::{logging, render};
use webstack_tools::ui::output::{
    failed_link_lines, linkcheck_summary_lines, print_lines, settings_lines,
};
use webstack_tools::ui::{LinkcheckCli, ProgressReporter, linkcheck_to_config};

#[tokio::main]
async fn main() {
    let cli = LinkcheckCli::parse();

    match run_linkcheck_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// `results/link_check_report.<ext>` unless an output path was given
pub fn report_path(output: Option<&str>, format: &str) -> PathBuf {
    match output {
        Some(path) => PathBuf::from(path),
        None => Path::new(defaults::RESULTS_DIR).join(format!(
            "link_check_report.{}",
            output_formats::extension(format)
        )),
    }
}

/// Main link checking logic extracted from main() for testing
pub async fn run_linkcheck_logic(cli: &LinkcheckCli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = linkcheck_to_config(cli);
    let config = Config::from_cli(&cli_config)?;
    let settings = config.settings(ToolDefaults::LINKCHECK);

    logging::init_logger(settings.verbose, cli_config.quiet);
    logging::log_settings("linkcheck", &settings);

    let dataset = dataset::load(&settings.dataset).inspect_err(|e| {
        logging::log_error("Could not load the dataset", Some(e));
    })?;

    let items = enumerate(&dataset, |entry| WorkFilter::All.matches(entry));
    if items.is_empty() {
        let error = "No links found in the dataset";
        logging::log_error(error, None);
        return Err(error.into());
    }

    if !cli_config.quiet {
        print_lines(&settings_lines(&settings));
        println!();
    }

    let client = HttpClient::from_settings(&settings)?;
    let mut progress = ProgressReporter::new(!cli_config.no_progress, cli_config.quiet);
    let outcome = check_links(items, &client, &settings, &mut progress).await;

    let generated_at = chrono::Local::now();
    let report = render(&cli.format, &outcome, &generated_at)?;
    let path = report_path(cli.output.as_deref(), &cli.format);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, report)?;

    if !cli_config.quiet {
        print_lines(&linkcheck_summary_lines(&outcome));
        println!("\n📄 Report saved to: {}", path.display());
    }

    if cli.failed_only {
        println!();
        print_lines(&failed_link_lines(&outcome));
    }

    Ok(if outcome.has_failures() { 1 } else { 0 })
}
