//! Reddit Image Scraper - CLI entry point.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use reddit_image_scraper::{
    cli::Args,
    config::{validate_config, Config},
    download::{scrape_collection, RunState},
    error::{exit_codes, Error, Result},
    fs::get_collection_folder,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_summary, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::TomlParse(_)
                | Error::UrlParse(_)
                | Error::InvalidFilename(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &config.scraper.collection,
        &config.scraper.sort.to_string(),
        config.scraper.limit,
        &config.scraper.output_directory.display().to_string(),
    );

    let started = Instant::now();

    let state = match scrape_collection(&config).await {
        Ok(state) => state,
        Err(e) => {
            // Still report an (empty) summary
            print_error(&format!("Scrape failed: {}", e));
            RunState::new(
                config.scraper.collection.clone(),
                get_collection_folder(&config)?,
                Default::default(),
            )
        }
    };

    if state.stats.found == 0 {
        print_info("No images to download");
    }

    print_summary(&state, started.elapsed());

    if state.stats.failed > 0 {
        print_warning(&format!("{} download(s) failed", state.stats.failed));
    }

    Ok(())
}
