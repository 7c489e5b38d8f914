//! Two-phase run: collect metadata, then drain the queue concurrently.

use std::sync::Arc;

use indicatif::ProgressBar;
use tokio_util::sync::CancellationToken;

use crate::api::ApiTransport;
use crate::config::{Config, EndpointsConfig};
use crate::download::collector::collect_metadata;
use crate::download::fetcher::{AssetFetcher, DEFAULT_BACKOFF};
use crate::download::pool::WorkerPool;
use crate::download::queue::WorkQueue;
use crate::download::rate_limit::{FixedDelay, RateLimitPolicy};
use crate::download::state::{CollectionSummary, DownloadReport, DownloadStats};
use crate::error::{Error, Result};
use crate::fs::OutputDirs;
use crate::output::create_item_bar;

/// Result of a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub collection: CollectionSummary,
    pub downloads: DownloadReport,
    /// Whether the download phase was interrupted before the queue drained.
    pub cancelled: bool,
}

/// Wires the collector, queue and worker pool together.
pub struct Pipeline {
    transport: Arc<dyn ApiTransport>,
    policy: Box<dyn RateLimitPolicy>,
    endpoints: EndpointsConfig,
    dirs: OutputDirs,
    workers: usize,
    max_retries: u32,
    overwrite_existing: bool,
    show_progress: bool,
}

impl Pipeline {
    pub fn from_config(transport: Arc<dyn ApiTransport>, config: &Config) -> Self {
        Self {
            transport,
            policy: Box::new(FixedDelay::new(config.download.guild_delay())),
            endpoints: config.endpoints.clone(),
            dirs: OutputDirs::from(&config.download),
            workers: config.download.workers,
            max_retries: config.download.max_retries,
            overwrite_existing: config.download.overwrite_existing,
            show_progress: true,
        }
    }

    /// Replace the default fixed per-guild delay.
    pub fn with_policy(mut self, policy: impl RateLimitPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn bar(&self, total: u64, message: &str) -> ProgressBar {
        if self.show_progress {
            create_item_bar(total, message)
        } else {
            ProgressBar::hidden()
        }
    }

    /// Run both phases.
    ///
    /// Collection failures abort the run. Download failures are counted in
    /// the returned report. Cancelling during collection aborts with
    /// [`Error::Cancelled`]; cancelling during downloads stops new work and
    /// returns what finished.
    pub async fn run(
        &self,
        guild_id: Option<&str>,
        cancel: CancellationToken,
    ) -> Result<RunSummary> {
        let queue = Arc::new(WorkQueue::new());

        let guild_bar = self.bar(0, "Processing Guilds");
        let collected = tokio::select! {
            result = collect_metadata(
                self.transport.as_ref(),
                self.policy.as_ref(),
                guild_id,
                &queue,
                &guild_bar,
            ) => result,
            _ = cancel.cancelled() => Err(Error::Cancelled),
        };
        guild_bar.finish();
        let collection = collected?;

        let total = queue.len() as u64;
        let item_bar = self.bar(total, "Downloading Items");
        let stats = Arc::new(DownloadStats::new());

        let fetcher = AssetFetcher::new(Arc::clone(&self.transport), self.endpoints.clone())
            .with_retries(self.max_retries, DEFAULT_BACKOFF);
        let mut pool = WorkerPool::new(
            fetcher,
            self.dirs.clone(),
            self.workers,
            Arc::clone(&stats),
            item_bar.clone(),
        );
        if !self.overwrite_existing {
            pool = pool.skip_existing();
        }

        tracing::info!(
            "Downloading {} item(s) with {} worker(s)",
            total,
            self.workers
        );
        let downloads = pool.run(Arc::clone(&queue), cancel.clone()).await;
        item_bar.finish();

        Ok(RunSummary {
            collection,
            downloads,
            cancelled: cancel.is_cancelled() && downloads.processed < total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::test_helpers::FakeTransport;
    use std::time::Duration;

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.endpoints = EndpointsConfig::single_host("http://host.test");
        config.download.emotes_directory = dir.join("emotes");
        config.download.stickers_directory = dir.join("stickers");
        config.download.workers = 4;
        config
    }

    fn pipeline(transport: Arc<FakeTransport>, config: &Config) -> Pipeline {
        Pipeline::from_config(transport, config)
            .with_policy(FixedDelay::new(Duration::ZERO))
            .show_progress(false)
    }

    #[tokio::test]
    async fn test_run_downloads_everything() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let transport = Arc::new(
            FakeTransport::default()
                .with_guilds(&["1"])
                .with_emoji("1", "9", "Pepe", false)
                .with_sticker("1", "5", "Wave!", 2)
                .with_sticker("1", "6", "Dance", 3)
                .with_content("http://host.test/emojis/9.png", b"png")
                .with_content("http://host.test/stickers/5.png", b"apng")
                .with_content("http://host.test/stickers/6.json", b"{}"),
        );

        let summary = pipeline(transport, &config)
            .run(None, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.collection.total_items(), 3);
        assert_eq!(summary.downloads.processed, 3);
        assert_eq!(summary.downloads.total_saved(), 3);
        assert!(!summary.cancelled);
        assert!(temp.path().join("emotes/Pepe_9.png").exists());
        assert!(temp.path().join("stickers/Wave!_5.apng").exists());
        assert!(temp.path().join("stickers/Dance_6.json").exists());
    }

    #[tokio::test]
    async fn test_auth_failure_downloads_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let transport = Arc::new(FakeTransport::default().with_guild_list_status(401));

        let err = pipeline(transport.clone(), &config)
            .run(None, CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Authentication(_)));
        assert!(transport.requested().is_empty());
        assert!(!temp.path().join("emotes").exists());
    }

    #[tokio::test]
    async fn test_cancel_during_collection() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_in(temp.path());
        let transport = Arc::new(FakeTransport::default().with_guilds(&["1", "2"]));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = Pipeline::from_config(transport, &config)
            .with_policy(FixedDelay::new(Duration::from_secs(30)))
            .show_progress(false)
            .run(None, cancel)
            .await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
