//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{normalize_collection, Config, SortMode, TimeWindow};

/// Reddit image scraper CLI.
#[derive(Parser, Debug)]
#[command(
    name = "reddit-image-scraper",
    version,
    about = "Download images from a subreddit without API keys",
    long_about = "Download images from a subreddit using the public JSON listings.\n\n\
                  Examples:\n  \
                  reddit-image-scraper wallpapers\n  \
                  reddit-image-scraper earthporn -l 100 -s top -t all\n  \
                  reddit-image-scraper pics --min-width 1920"
)]
pub struct Args {
    /// Subreddit name (with or without the r/ prefix).
    pub collection: String,

    /// Output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of images to download.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Sort order.
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Time window for the 'top' sort.
    #[arg(short, long, value_enum)]
    pub time: Option<TimeArg>,

    /// Minimum post score.
    #[arg(long, allow_negative_numbers = true)]
    pub min_score: Option<i64>,

    /// Minimum image width.
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Minimum image height.
    #[arg(long)]
    pub min_height: Option<u32>,

    /// Include NSFW content.
    #[arg(long)]
    pub nsfw: bool,

    /// Re-download files that already exist.
    #[arg(long)]
    pub no_skip: bool,

    /// Number of parallel downloads.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "REDDIT_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI sort argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Hot,
    New,
    Top,
    Rising,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Hot => SortMode::Hot,
            SortArg::New => SortMode::New,
            SortArg::Top => SortMode::Top,
            SortArg::Rising => SortMode::Rising,
        }
    }
}

/// CLI time window argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimeArg {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl From<TimeArg> for TimeWindow {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::Hour => TimeWindow::Hour,
            TimeArg::Day => TimeWindow::Day,
            TimeArg::Week => TimeWindow::Week,
            TimeArg::Month => TimeWindow::Month,
            TimeArg::Year => TimeWindow::Year,
            TimeArg::All => TimeWindow::All,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        config.scraper.collection = normalize_collection(&self.collection);

        if let Some(output) = self.output {
            config.scraper.output_directory = output;
        }

        if let Some(limit) = self.limit {
            config.scraper.limit = limit;
        }

        if let Some(sort) = self.sort {
            config.scraper.sort = sort.into();
        }

        if let Some(time) = self.time {
            config.scraper.time_window = time.into();
        }

        if let Some(workers) = self.workers {
            config.scraper.workers = workers;
        }

        if let Some(min_score) = self.min_score {
            config.filter.min_score = min_score;
        }

        if let Some(min_width) = self.min_width {
            config.filter.min_width = min_width;
        }

        if let Some(min_height) = self.min_height {
            config.filter.min_height = min_height;
        }

        // Boolean flags (only override if set to non-default)
        if self.nsfw {
            config.filter.include_nsfw = true;
        }

        if self.no_skip {
            config.scraper.skip_existing = false;
        }

        if self.quiet {
            config.scraper.verbose = false;
        }
    }
}
