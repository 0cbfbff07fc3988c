use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use webstack_tools::config::{Config, Settings, ToolDefaults};
use webstack_tools::core::constants::defaults;
use webstack_tools::dataset::{self, Dataset};
use webstack_tools::favicon::{
    FaviconResolver, find_logo, scan_missing, update_missing, verify_logos,
};
use webstack_tools::net::HttpClient;
use webstack_tools::reporting::{logging, render_logo_report};
use webstack_tools::ui::output::{
    print_lines, quality_lines, scan_lines, update_summary_lines, verify_summary_lines,
};
use webstack_tools::ui::{
    LogoCli, LogoCommand, ProgressReporter, clipboard_notice, confirm, copy_to_clipboard,
    logo_to_config,
};

#[tokio::main]
async fn main() {
    let cli = LogoCli::parse();

    match run_logo_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main logo tool logic extracted from main() for testing
pub async fn run_logo_logic(cli: &LogoCli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = logo_to_config(cli);
    let config = Config::from_cli(&cli_config)?;
    let settings = config.settings(ToolDefaults::LOGO);

    logging::init_logger(settings.verbose, false);
    logging::log_settings("logo", &settings);

    println!("🔧 Webstack logo tool\n");

    let client = HttpClient::from_settings(&settings)?;
    let resolver = FaviconResolver::new(client, &settings);

    let mut dataset = if cli.command.needs_dataset() {
        dataset::load(&settings.dataset).inspect_err(|e| {
            logging::log_error("Could not load the dataset", Some(e));
        })?
    } else {
        Dataset::default()
    };

    let mut progress = ProgressReporter::new(!cli_config.no_progress, false);

    match cli.command {
        LogoCommand::Get { ref target } => Ok(get(&resolver, target, false).await),
        LogoCommand::GetHq { ref target } => Ok(get(&resolver, target, true).await),
        LogoCommand::Check { ref url } => {
            let info = resolver.quality(url).await;
            print_lines(&quality_lines(&info));
            Ok(if info.valid { 0 } else { 1 })
        }
        LogoCommand::Scan => {
            print_lines(&scan_lines(&scan_missing(&dataset)));
            Ok(0)
        }
        LogoCommand::Update { dry_run } => {
            update(&mut dataset, &resolver, &settings, dry_run, &mut progress).await
        }
        LogoCommand::Verify => {
            let summary = verify_logos(&mut dataset, &resolver, &settings, &mut progress).await;
            let mut exit_code = 0;
            if !summary.invalid.is_empty() {
                exit_code = save(&settings, &dataset);
                if exit_code == 0 {
                    println!("✅ Cleared invalid logos");
                }
            }
            print_lines(&verify_summary_lines(&summary));
            Ok(exit_code)
        }
        LogoCommand::Report { ref output } => {
            let path = match output {
                Some(path) => PathBuf::from(path),
                None => Path::new(defaults::RESULTS_DIR).join("logo_status_report.md"),
            };
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, render_logo_report(&dataset, &chrono::Local::now()))?;
            println!("📄 Report saved to: {}", path.display());
            Ok(0)
        }
    }
}

async fn get(resolver: &FaviconResolver, target: &str, quality_mode: bool) -> i32 {
    let found = find_logo(resolver, target, quality_mode, &mut |line| println!("{line}")).await;

    match found {
        Some(url) => {
            println!("\n🎯 Result: {url}");
            if quality_mode {
                print_lines(&quality_lines(&resolver.quality(&url).await));
            }
            println!("{}", clipboard_notice(copy_to_clipboard(&url)));
            0
        }
        None => {
            println!("\n❌ No favicon found for: {target}");
            1
        }
    }
}

async fn update(
    dataset: &mut Dataset,
    resolver: &FaviconResolver,
    settings: &Settings,
    dry_run: bool,
    progress: &mut ProgressReporter,
) -> Result<i32, Box<dyn std::error::Error>> {
    let missing = scan_missing(dataset);
    if missing.is_empty() {
        println!("✅ Every site already has a logo");
        return Ok(0);
    }

    if dry_run {
        print_lines(&scan_lines(&missing));
        println!("\n🔍 Dry run: {} entry(s) would be updated", missing.len());
        if !confirm("Fetch logos and update the dataset?")? {
            println!("Cancelled, nothing changed");
            return Ok(0);
        }
    }

    let summary = update_missing(dataset, &missing, resolver, settings, progress).await;

    let exit_code = if summary.updated > 0 {
        let exit_code = save(settings, dataset);
        if exit_code == 0 {
            println!("\n💾 Saved {}", settings.dataset.display());
        }
        exit_code
    } else {
        0
    };

    print_lines(&update_summary_lines(&summary));
    Ok(exit_code)
}

/// Save the dataset, reporting a failure instead of propagating it
fn save(settings: &Settings, dataset: &Dataset) -> i32 {
    match dataset::save(&settings.dataset, dataset) {
        Ok(()) => 0,
        Err(e) => {
            logging::log_save_failure(&settings.dataset, &e);
            eprintln!(
                "Error: could not save '{}': {e}",
                settings.dataset.display()
            );
            1
        }
    }
}
