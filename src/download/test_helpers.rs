//! In-memory transport shared by the download tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiTransport, Guild, RawEmoji, RawSticker};
use crate::error::{Error, Result};

/// Scripted [`ApiTransport`] that records every content request.
#[derive(Default)]
pub struct FakeTransport {
    guilds: Option<Vec<Guild>>,
    guild_list_status: Option<u16>,
    emojis: HashMap<String, Vec<RawEmoji>>,
    stickers: HashMap<String, Vec<RawSticker>>,
    failing_listings: Vec<String>,
    content: HashMap<String, Vec<u8>>,
    transient_failures: Mutex<HashMap<String, u32>>,
    rate_limited: HashMap<String, u64>,
    requested: Mutex<Vec<String>>,
    listing_calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn with_guilds(mut self, ids: &[&str]) -> Self {
        self.guilds = Some(ids.iter().map(|id| Guild::from_id(*id)).collect());
        self
    }

    pub fn with_guild_list_status(mut self, status: u16) -> Self {
        self.guild_list_status = Some(status);
        self
    }

    pub fn with_emoji(mut self, guild: &str, id: &str, name: &str, animated: bool) -> Self {
        self.emojis.entry(guild.to_string()).or_default().push(RawEmoji {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            animated: Some(animated),
        });
        self
    }

    pub fn with_sticker(mut self, guild: &str, id: &str, name: &str, format_type: i64) -> Self {
        self.stickers
            .entry(guild.to_string())
            .or_default()
            .push(RawSticker {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                format_type: Some(format_type),
            });
        self
    }

    /// Make the emoji listing of `guild` fail.
    pub fn with_failing_listing(mut self, guild: &str) -> Self {
        self.failing_listings.push(guild.to_string());
        self
    }

    pub fn with_content(mut self, url: &str, bytes: &[u8]) -> Self {
        self.content.insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Answer `url` with HTTP 503 for the next `count` requests.
    pub fn with_transient_failures(self, url: &str, count: u32) -> Self {
        self.transient_failures
            .lock()
            .unwrap()
            .insert(url.to_string(), count);
        self
    }

    /// Answer every request for `url` with a 429 asking to wait `secs`.
    pub fn with_rate_limit(mut self, url: &str, secs: u64) -> Self {
        self.rate_limited.insert(url.to_string(), secs);
        self
    }

    /// Content URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    /// Listing calls made so far, e.g. `guilds`, `emojis:1`, `stickers:1`.
    pub fn listing_calls(&self) -> Vec<String> {
        self.listing_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn list_guilds(&self) -> Result<Vec<Guild>> {
        self.listing_calls.lock().unwrap().push("guilds".into());
        if let Some(status) = self.guild_list_status {
            return Err(Error::Authentication(format!("HTTP {}", status)));
        }
        Ok(self.guilds.clone().unwrap_or_default())
    }

    async fn list_emojis(&self, guild_id: &str) -> Result<Vec<RawEmoji>> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(format!("emojis:{}", guild_id));
        if self.failing_listings.iter().any(|g| g == guild_id) {
            return Err(Error::Api(format!("listing failed for {}", guild_id)));
        }
        Ok(self.emojis.get(guild_id).cloned().unwrap_or_default())
    }

    async fn list_stickers(&self, guild_id: &str) -> Result<Vec<RawSticker>> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(format!("stickers:{}", guild_id));
        Ok(self.stickers.get(guild_id).cloned().unwrap_or_default())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(secs) = self.rate_limited.get(url) {
            return Err(Error::RateLimited(*secs));
        }

        if let Some(remaining) = self.transient_failures.lock().unwrap().get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::Fetch {
                    url: url.to_string(),
                    status: 503,
                });
            }
        }

        self.content.get(url).cloned().ok_or_else(|| Error::Fetch {
            url: url.to_string(),
            status: 404,
        })
    }
}
