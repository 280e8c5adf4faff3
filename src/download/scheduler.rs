//! Bounded-concurrency download scheduling.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::fs;

use crate::download::fetcher::AssetFetcher;
use crate::download::pool::WorkerPool;
use crate::download::state::{RunState, Stats};
use crate::error::Result;
use crate::fs::naming::partial_path;
use crate::media::Candidate;

/// How a single candidate ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Transferred and written to the path.
    Downloaded(PathBuf),
    /// A file of the derived name already existed.
    AlreadyPresent(PathBuf),
}

/// Downloads candidates into a collection folder.
pub struct DownloadScheduler {
    fetcher: Arc<dyn AssetFetcher>,
    pool: WorkerPool,
    output_path: PathBuf,
    progress: ProgressBar,
}

impl DownloadScheduler {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, pool: WorkerPool, output_path: PathBuf) -> Self {
        Self {
            fetcher,
            pool,
            output_path,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on the given bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Download every candidate. Failures are counted, never propagated.
    ///
    /// Outcomes are folded into `state` as tasks complete; the returned
    /// counters cover this call only.
    pub async fn run(&self, candidates: Vec<Candidate>, state: &mut RunState) -> Stats {
        let mut stats = Stats {
            found: candidates.len() as u64,
            ..Default::default()
        };

        if candidates.is_empty() {
            return stats;
        }

        tracing::info!(
            "Downloading {} images with {} workers",
            candidates.len(),
            self.pool.width()
        );
        self.progress.set_length(candidates.len() as u64);

        self.pool
            .run(
                candidates,
                |candidate| async move {
                    let result = self.download_one(&candidate).await;
                    (candidate, result)
                },
                |(candidate, result)| {
                    match result {
                        Ok(DownloadOutcome::Downloaded(path)) => {
                            tracing::debug!("Downloaded: {}", path.display());
                            state.mark_downloaded(&candidate.id);
                            stats.downloaded += 1;
                        }
                        Ok(DownloadOutcome::AlreadyPresent(path)) => {
                            tracing::debug!("Already present: {}", path.display());
                            state.mark_downloaded(&candidate.id);
                            stats.downloaded += 1;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to download {}: {}", candidate.id, e);
                            state.mark_failed(&candidate.id);
                            stats.failed += 1;
                        }
                    }
                    self.progress.inc(1);
                },
            )
            .await;

        self.progress.finish_and_clear();
        state.stats.found += stats.found;
        stats
    }

    /// Download one candidate to its derived filename.
    pub async fn download_one(&self, candidate: &Candidate) -> Result<DownloadOutcome> {
        let target = self.output_path.join(candidate.filename());

        if fs::try_exists(&target).await? {
            return Ok(DownloadOutcome::AlreadyPresent(target));
        }

        let body = self.fetcher.fetch(&candidate.asset_url).await?;
        write_atomically(&target, &body).await?;

        Ok(DownloadOutcome::Downloaded(target))
    }
}

/// Write to a hidden sibling and rename into place.
async fn write_atomically(target: &Path, body: &[u8]) -> Result<()> {
    let partial = partial_path(target);

    let result: std::io::Result<()> = async {
        fs::write(&partial, body).await?;
        fs::rename(&partial, target).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&partial).await;
        return Err(e.into());
    }

    Ok(())
}
