//! Run state and statistics.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::dedup::DeduplicationIndex;

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Candidates queued for download.
    pub found: u64,
    /// Candidates now present on disk, including ones that already were.
    pub downloaded: u64,
    /// Qualifying posts skipped because they were already known.
    pub skipped: u64,
    pub failed: u64,
}

/// Per-invocation state. Never persisted.
#[derive(Debug, Default)]
pub struct RunState {
    pub collection: String,
    pub output_path: PathBuf,
    /// Identifiers known to be on disk.
    pub index: DeduplicationIndex,
    /// Identifiers that failed this run.
    pub failed: HashSet<String>,
    pub stats: Stats,
}

impl RunState {
    /// Create state for a collection.
    pub fn new(collection: String, output_path: PathBuf, index: DeduplicationIndex) -> Self {
        Self {
            collection,
            output_path,
            index,
            ..Default::default()
        }
    }

    /// Record a materialized identifier.
    pub fn mark_downloaded(&mut self, id: &str) {
        self.index.mark(id);
        self.stats.downloaded += 1;
    }

    /// Record a failed identifier.
    pub fn mark_failed(&mut self, id: &str) {
        self.failed.insert(id.to_string());
        self.stats.failed += 1;
    }
}
