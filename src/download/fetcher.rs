//! Asset content fetching.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::ApiTransport;
use crate::config::EndpointsConfig;
use crate::download::rate_limit::MAX_RETRY_WAIT;
use crate::error::{Error, Result};
use crate::media::{StickerFormat, WorkItem};

/// Base delay between retries of a transient failure.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Content of one asset, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    /// Extension of the file to write; may differ from the requested one.
    pub extension: &'static str,
}

/// Resolves content URLs and downloads asset bytes.
pub struct AssetFetcher {
    transport: Arc<dyn ApiTransport>,
    endpoints: EndpointsConfig,
    max_retries: u32,
    backoff: Duration,
}

impl AssetFetcher {
    pub fn new(transport: Arc<dyn ApiTransport>, endpoints: EndpointsConfig) -> Self {
        Self {
            transport,
            endpoints,
            max_retries: 0,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Retry transient failures up to `max_retries` extra times.
    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff = backoff;
        self
    }

    /// URL the content of `item` is requested from.
    pub fn content_url(&self, item: &WorkItem) -> String {
        match item {
            WorkItem::Emoji(emoji) => format!(
                "{}/emojis/{}.{}",
                self.endpoints.cdn_base,
                emoji.id,
                emoji.extension()
            ),
            WorkItem::Sticker(sticker) if sticker.format == StickerFormat::Lottie => {
                format!("{}/stickers/{}.json", self.endpoints.app_base, sticker.id)
            }
            WorkItem::Sticker(sticker) => format!(
                "{}/stickers/{}.{}",
                self.endpoints.media_base,
                sticker.id,
                sticker.format.request_extension()
            ),
        }
    }

    /// Extension the fetched content is saved under.
    pub fn saved_extension(item: &WorkItem) -> &'static str {
        match item {
            WorkItem::Emoji(emoji) => emoji.extension(),
            WorkItem::Sticker(sticker) => sticker.format.saved_extension(),
        }
    }

    /// Download the content of `item`.
    ///
    /// Backoff waits end early with [`Error::Cancelled`] once `cancel` fires.
    pub async fn fetch(
        &self,
        item: &WorkItem,
        cancel: &CancellationToken,
    ) -> Result<FetchedAsset> {
        let url = self.content_url(item);
        let bytes = self.fetch_with_retry(&url, cancel).await?;

        Ok(FetchedAsset {
            bytes,
            extension: Self::saved_extension(item),
        })
    }

    async fn fetch_with_retry(&self, url: &str, cancel: &CancellationToken) -> Result<Vec<u8>> {
        let mut attempt = 0;
        loop {
            match self.transport.fetch_bytes(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let Some(delay) = self.retry_delay(&e, attempt) else {
                        tracing::debug!("Not waiting out {} for {}", e, url);
                        return Err(e);
                    };
                    tracing::debug!(
                        "Transient failure fetching {} ({}), retrying in {:?}",
                        url,
                        e,
                        delay
                    );
                    tokio::select! {
                        _ = sleep(delay) => {}
                        _ = cancel.cancelled() => return Err(Error::Cancelled),
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Wait before the next attempt, or `None` when the server asks for
    /// longer than [`MAX_RETRY_WAIT`].
    fn retry_delay(&self, error: &Error, attempt: u32) -> Option<Duration> {
        if let Error::RateLimited(secs) = error {
            let requested = Duration::from_secs(*secs);
            return (requested <= MAX_RETRY_WAIT).then_some(requested);
        }

        let exponential = self.backoff.saturating_mul(1 << attempt.min(6));
        let jitter_ms = self.backoff.as_millis() as u64;
        let jitter = if jitter_ms > 0 {
            Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
        } else {
            Duration::ZERO
        };
        Some((exponential + jitter).min(MAX_RETRY_WAIT))
    }
}
