use clap::Parser;
use webstack_tools::config::{Config, Settings, ToolDefaults};
use webstack_tools::dataset;
use webstack_tools::describe::{describe_single, update_descriptions};
use webstack_tools::net::HttpClient;
use webstack_tools::reporting::logging;
use webstack_tools::ui::output::{describe_summary_lines, print_lines, settings_lines};
use webstack_tools::ui::{DescribeCli, ProgressReporter, describe_to_config};

#[tokio::main]
async fn main() {
    let cli = DescribeCli::parse();

    match run_describe_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main description logic extracted from main() for testing
pub async fn run_describe_logic(cli: &DescribeCli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = describe_to_config(cli);
    let config = Config::from_cli(&cli_config)?;
    let settings = config.settings(ToolDefaults::DESCRIBE);

    logging::init_logger(settings.verbose, cli_config.quiet);
    logging::log_settings("describe", &settings);

    let client = HttpClient::from_settings(&settings)?;

    if let Some(ref url) = cli.test_url {
        return Ok(run_single(&client, &settings, url).await);
    }

    let mut dataset = dataset::load(&settings.dataset).inspect_err(|e| {
        logging::log_error("Could not load the dataset", Some(e));
    })?;

    if !cli_config.quiet {
        print_lines(&settings_lines(&settings));
        println!();
    }

    let mut progress = ProgressReporter::new(!cli_config.no_progress, cli_config.quiet);
    let summary =
        update_descriptions(&mut dataset, client, &settings, !cli.all, &mut progress).await;

    let saved = match dataset::save(&settings.dataset, &dataset) {
        Ok(()) => true,
        Err(e) => {
            logging::log_save_failure(&settings.dataset, &e);
            eprintln!(
                "Error: could not save '{}': {e}",
                settings.dataset.display()
            );
            false
        }
    };

    if !cli_config.quiet {
        print_lines(&describe_summary_lines(&summary));
        if saved {
            println!("\n💾 Saved {}", settings.dataset.display());
        }
    }

    Ok(if saved { 0 } else { 1 })
}

async fn run_single(client: &HttpClient, settings: &Settings, url: &str) -> i32 {
    println!("🔍 Testing: {url}");
    match describe_single(client, settings, url).await {
        Some(description) => {
            println!("✓ {description}");
            0
        }
        None => {
            println!("✗ Unreachable, no description generated");
            1
        }
    }
}
