//! Download statistics tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::media::AssetKind;

/// Outcome of the metadata collection phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    pub guilds: u64,
    pub emojis: u64,
    pub stickers: u64,
}

impl CollectionSummary {
    /// Total work items queued.
    pub fn total_items(&self) -> u64 {
        self.emojis + self.stickers
    }
}

/// Counters updated concurrently by the download workers.
#[derive(Debug, Default)]
pub struct DownloadStats {
    emojis_saved: AtomicU64,
    stickers_saved: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    processed: AtomicU64,
}

impl DownloadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_saved(&self, kind: AssetKind) {
        match kind {
            AssetKind::Emoji => self.emojis_saved.fetch_add(1, Ordering::Relaxed),
            AssetKind::Sticker => self.stickers_saved.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one item as finished, whatever its outcome.
    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DownloadReport {
        DownloadReport {
            emojis_saved: self.emojis_saved.load(Ordering::Relaxed),
            stickers_saved: self.stickers_saved.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DownloadStats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadReport {
    pub emojis_saved: u64,
    pub stickers_saved: u64,
    pub skipped: u64,
    pub failed: u64,
    pub processed: u64,
}

impl DownloadReport {
    /// Get total saved count.
    pub fn total_saved(&self) -> u64 {
        self.emojis_saved + self.stickers_saved
    }
}
