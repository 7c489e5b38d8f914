//! Request pacing for metadata listing calls.

use std::time::Duration;

/// Longest server-requested wait that is honoured before giving up.
pub const MAX_RETRY_WAIT: Duration = Duration::from_secs(60);

/// Listing endpoints the collector calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GuildList,
    GuildEmojis,
    GuildStickers,
}

/// Pacing and 429 handling, keyed by endpoint.
pub trait RateLimitPolicy: Send + Sync {
    /// Wait inserted after a successful call to `endpoint`.
    fn pause_after(&self, endpoint: Endpoint) -> Duration;

    /// Wait before retrying a rate-limited call, or `None` to fail.
    ///
    /// `attempt` counts retries already made for this call.
    fn retry_after(&self, endpoint: Endpoint, attempt: u32, requested: Duration)
        -> Option<Duration>;
}

/// Fixed pause once per guild, after its sticker listing, which is the last
/// call made for a guild.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    per_guild: Duration,
    max_retries: u32,
}

impl FixedDelay {
    pub fn new(per_guild: Duration) -> Self {
        Self {
            per_guild,
            max_retries: 1,
        }
    }

    /// Number of 429 responses tolerated per call.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RateLimitPolicy for FixedDelay {
    fn pause_after(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::GuildStickers => self.per_guild,
            Endpoint::GuildList | Endpoint::GuildEmojis => Duration::ZERO,
        }
    }

    fn retry_after(
        &self,
        _endpoint: Endpoint,
        attempt: u32,
        requested: Duration,
    ) -> Option<Duration> {
        if attempt >= self.max_retries || requested > MAX_RETRY_WAIT {
            return None;
        }
        Some(requested.max(self.per_guild))
    }
}
