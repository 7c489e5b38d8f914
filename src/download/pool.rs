//! Concurrent download workers.

use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::download::fetcher::AssetFetcher;
use crate::download::queue::WorkQueue;
use crate::download::state::{DownloadReport, DownloadStats};
use crate::error::Result;
use crate::fs::{save_asset, target_path, OutputDirs};
use crate::media::WorkItem;

/// State shared by every worker of one run.
struct WorkerContext {
    fetcher: AssetFetcher,
    dirs: OutputDirs,
    overwrite_existing: bool,
    stats: Arc<DownloadStats>,
    progress: ProgressBar,
}

/// Fixed-size set of workers draining a [`WorkQueue`].
pub struct WorkerPool {
    fetcher: AssetFetcher,
    dirs: OutputDirs,
    workers: usize,
    overwrite_existing: bool,
    stats: Arc<DownloadStats>,
    progress: ProgressBar,
}

impl WorkerPool {
    pub fn new(
        fetcher: AssetFetcher,
        dirs: OutputDirs,
        workers: usize,
        stats: Arc<DownloadStats>,
        progress: ProgressBar,
    ) -> Self {
        Self {
            fetcher,
            dirs,
            workers: workers.max(1),
            overwrite_existing: true,
            stats,
            progress,
        }
    }

    /// Skip items whose target file already exists.
    pub fn skip_existing(mut self) -> Self {
        self.overwrite_existing = false;
        self
    }

    /// Spawn the workers and wait until all of them have exited.
    ///
    /// Workers stop once the queue is empty or `cancel` fires; cancellation
    /// is observed between items, never during one.
    pub async fn run(self, queue: Arc<WorkQueue>, cancel: CancellationToken) -> DownloadReport {
        let workers = self.workers;
        let context = Arc::new(WorkerContext {
            fetcher: self.fetcher,
            dirs: self.dirs,
            overwrite_existing: self.overwrite_existing,
            stats: self.stats,
            progress: self.progress,
        });

        let mut join_set = JoinSet::new();

        for worker_id in 0..workers {
            let context = Arc::clone(&context);
            let queue = Arc::clone(&queue);
            let cancel = cancel.clone();
            join_set.spawn(async move { worker(worker_id, context, queue, cancel).await });
        }

        while let Some(res) = join_set.join_next().await {
            if let Err(e) = res {
                tracing::error!("Download worker terminated abnormally: {}", e);
            }
        }

        context.stats.snapshot()
    }
}

/// Increments progress when dropped, so every dequeued item counts once
/// regardless of how its processing ends.
struct ProgressGuard<'a> {
    stats: &'a DownloadStats,
    progress: &'a ProgressBar,
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.stats.record_processed();
        self.progress.inc(1);
    }
}

async fn worker(
    worker_id: usize,
    context: Arc<WorkerContext>,
    queue: Arc<WorkQueue>,
    cancel: CancellationToken,
) {
    tracing::trace!("Worker {} started", worker_id);

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("Worker {} stopping: cancelled", worker_id);
            break;
        }

        let Some(item) = queue.pop() else {
            break;
        };

        let _guard = ProgressGuard {
            stats: &context.stats,
            progress: &context.progress,
        };

        if let Err(e) = process_item(&context, &item, &cancel).await {
            context.stats.record_failed();
            tracing::warn!(
                "Failed to download {} '{}' ({}): {}",
                item.kind(),
                item.name(),
                item.id(),
                e
            );
        }
    }

    tracing::trace!("Worker {} finished", worker_id);
}

async fn process_item(
    context: &WorkerContext,
    item: &WorkItem,
    cancel: &CancellationToken,
) -> Result<()> {
    let directory = context.dirs.for_kind(item.kind());

    if !context.overwrite_existing {
        let extension = AssetFetcher::saved_extension(item);
        let existing = target_path(directory, item.name(), item.id(), extension);
        if tokio::fs::try_exists(&existing).await.unwrap_or(false) {
            tracing::debug!("Skipping existing file: {}", existing.display());
            context.stats.record_skipped();
            return Ok(());
        }
    }

    let fetched = context.fetcher.fetch(item, cancel).await?;
    let path = save_asset(
        directory,
        item.name(),
        item.id(),
        fetched.extension,
        &fetched.bytes,
    )
    .await?;

    context.stats.record_saved(item.kind());
    tracing::debug!("Downloaded: {}", path.display());

    Ok(())
}
