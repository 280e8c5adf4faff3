//! End-to-end scraping of one collection.

use std::collections::HashSet;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::api::{ListingQuery, RawEntry, RedditApi, Selection};
use crate::config::Config;
use crate::dedup::DeduplicationIndex;
use crate::download::fetcher::HttpFetcher;
use crate::download::pool::WorkerPool;
use crate::download::scheduler::DownloadScheduler;
use crate::download::state::RunState;
use crate::error::Result;
use crate::fs::paths::{ensure_dir, get_collection_folder};
use crate::media::{classify, evaluate, Candidate, FilterPolicy};
use crate::output::create_item_bar;

/// Turns listing entries into candidates: resolve, filter, dedup.
pub struct CandidateSelector<'a> {
    collection: &'a str,
    policy: FilterPolicy,
    index: &'a DeduplicationIndex,
    queued: HashSet<String>,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(collection: &'a str, policy: FilterPolicy, index: &'a DeduplicationIndex) -> Self {
        Self {
            collection,
            policy,
            index,
            queued: HashSet::new(),
        }
    }

    /// Decide what to do with one entry.
    pub fn select(&mut self, entry: RawEntry) -> Selection<Candidate> {
        let shape = classify(&entry);

        if let Err(reason) = evaluate(&entry, shape.asset_url(), &self.policy) {
            tracing::debug!("Rejected {} ({}): {}", entry.id, shape.label(), reason);
            return Selection::Reject;
        }

        let Some(url) = shape.asset_url() else {
            return Selection::Reject;
        };
        let Some(candidate) = Candidate::from_entry(&entry, url.to_string(), self.collection)
        else {
            return Selection::Reject;
        };

        if self.index.contains(&candidate.id) || !self.queued.insert(candidate.id.clone()) {
            tracing::debug!("Skipping known post {}", candidate.id);
            return Selection::Skip;
        }

        Selection::Keep(candidate)
    }
}

/// Scrape one collection: list, select, download.
///
/// Listing and download failures are logged and reflected in the returned
/// state; only local setup errors (output folder, HTTP client) are returned.
pub async fn scrape_collection(config: &Config) -> Result<RunState> {
    let collection = config.scraper.collection.clone();
    let output_path = get_collection_folder(config)?;
    ensure_dir(&output_path)?;

    let index = if config.scraper.skip_existing {
        match DeduplicationIndex::scan_directory(&output_path) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("Could not scan {}: {}", output_path.display(), e);
                DeduplicationIndex::new()
            }
        }
    } else {
        DeduplicationIndex::new()
    };
    if !index.is_empty() {
        tracing::info!("{} existing files found", index.len());
    }

    let api = RedditApi::new(&config.network)?;
    let fetcher = HttpFetcher::new(&config.network)?;

    let mut state = RunState::new(collection.clone(), output_path.clone(), index);

    let query = ListingQuery::new(
        collection.as_str(),
        config.scraper.sort,
        config.scraper.time_window,
    );

    tracing::info!(
        "Searching r/{} (sort: {}, limit: {})",
        collection,
        config.scraper.sort,
        config.scraper.limit
    );

    let outcome = {
        let mut selector = CandidateSelector::new(&collection, config.filter_policy(), &state.index);
        api.fetch_until(&query, config.scraper.limit, |entry| selector.select(entry))
            .await
    };

    if let Some(e) = &outcome.error {
        tracing::warn!(
            "Listing ended early after {} page(s): {}",
            outcome.pages,
            e
        );
    }
    tracing::info!("{} images found", outcome.items.len());
    state.stats.skipped += outcome.skipped as u64;

    let progress = if config.scraper.verbose {
        create_item_bar(outcome.items.len() as u64, "Downloading")
    } else {
        ProgressBar::hidden()
    };

    let scheduler = DownloadScheduler::new(
        Arc::new(fetcher),
        WorkerPool::new(config.scraper.workers),
        output_path,
    )
    .with_progress(progress);

    let stats = scheduler.run(outcome.items, &mut state).await;
    tracing::info!(
        "{} of {} images downloaded, {} failed",
        stats.downloaded,
        stats.found,
        stats.failed
    );

    Ok(state)
}
