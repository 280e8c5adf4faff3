//! Download module.
//!
//! This module provides:
//! - Run state and statistics
//! - A bounded worker pool
//! - Asset fetching with content-type checks
//! - Download scheduling with per-candidate failure isolation
//! - The end-to-end collection pipeline

pub mod collection;
pub mod fetcher;
pub mod pool;
pub mod scheduler;
pub mod state;

pub use collection::{scrape_collection, CandidateSelector};
pub use fetcher::{AssetFetcher, HttpFetcher};
pub use pool::WorkerPool;
pub use scheduler::{DownloadOutcome, DownloadScheduler};
pub use state::{RunState, Stats};
