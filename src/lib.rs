//! Reddit Image Scraper - download images from public subreddit listings.
//!
//! # Features
//!
//! - Paginated listing retrieval with cursor continuation
//! - Image URL resolution for direct links, galleries, previews and image-sharing pages
//! - Score, dimension and NSFW filtering
//! - Deduplication against files from earlier runs
//! - Bounded-concurrency downloads with per-file failure isolation
//! - Rate-limit cooldown and retry
//!
//! # Example
//!
//! ```no_run
//! use reddit_image_scraper::{scrape_collection, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.scraper.collection = "wallpapers".to_string();
//!
//!     let state = scrape_collection(&config).await?;
//!     println!("{} downloaded", state.stats.downloaded);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{ListingQuery, RawEntry, RedditApi};
pub use config::{Config, SortMode, TimeWindow};
pub use dedup::DeduplicationIndex;
pub use download::{scrape_collection, DownloadScheduler, RunState, Stats, WorkerPool};
pub use error::{Error, Result};
pub use media::{Candidate, FilterPolicy, PostShape};
