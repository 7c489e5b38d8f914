//! Guild enumeration and metadata collection.

use std::future::Future;
use std::time::Duration;

use indicatif::ProgressBar;
use tokio::time::sleep;

use crate::api::{ApiTransport, Guild};
use crate::download::queue::WorkQueue;
use crate::download::rate_limit::{Endpoint, RateLimitPolicy};
use crate::download::state::CollectionSummary;
use crate::error::{Error, Result};
use crate::media::{parse_emojis, parse_stickers};

/// List the target guilds and queue one work item per emoji and sticker.
///
/// Guilds are processed one at a time with a policy-defined pause between
/// them. Any listing failure aborts the collection.
pub async fn collect_metadata(
    transport: &dyn ApiTransport,
    policy: &dyn RateLimitPolicy,
    guild_id: Option<&str>,
    queue: &WorkQueue,
    progress: &ProgressBar,
) -> Result<CollectionSummary> {
    let guilds = match guild_id {
        Some(id) => vec![Guild::from_id(id)],
        None => {
            let guilds = call(policy, Endpoint::GuildList, || transport.list_guilds()).await?;
            pause(policy, Endpoint::GuildList).await;
            guilds
        }
    };

    tracing::info!("Collecting metadata for {} guild(s)", guilds.len());
    progress.set_length(guilds.len() as u64);

    let mut summary = CollectionSummary::default();

    for guild in &guilds {
        tracing::debug!("Listing assets of guild {}", guild.display_name());

        let raw = call(policy, Endpoint::GuildEmojis, || {
            transport.list_emojis(&guild.id)
        })
        .await?;
        let emojis = parse_emojis(&guild.id, raw)?;
        summary.emojis += emojis.len() as u64;
        queue.extend(emojis);
        pause(policy, Endpoint::GuildEmojis).await;

        let raw = call(policy, Endpoint::GuildStickers, || {
            transport.list_stickers(&guild.id)
        })
        .await?;
        let stickers = parse_stickers(&guild.id, raw)?;
        summary.stickers += stickers.len() as u64;
        queue.extend(stickers);
        pause(policy, Endpoint::GuildStickers).await;

        summary.guilds += 1;
        progress.inc(1);
    }

    tracing::info!(
        "Queued {} emoji(s) and {} sticker(s) from {} guild(s)",
        summary.emojis,
        summary.stickers,
        summary.guilds
    );

    Ok(summary)
}

/// Run a listing request, waiting out 429 responses while the policy allows.
async fn call<T, F, Fut>(
    policy: &dyn RateLimitPolicy,
    endpoint: Endpoint,
    mut request: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match request().await {
            Err(Error::RateLimited(secs)) => {
                match policy.retry_after(endpoint, attempt, Duration::from_secs(secs)) {
                    Some(wait) => {
                        tracing::warn!("Rate limited on {:?}, waiting {:?}", endpoint, wait);
                        sleep(wait).await;
                        attempt += 1;
                    }
                    None => return Err(Error::RateLimited(secs)),
                }
            }
            result => return result,
        }
    }
}

async fn pause(policy: &dyn RateLimitPolicy, endpoint: Endpoint) {
    let wait = policy.pause_after(endpoint);
    if !wait.is_zero() {
        sleep(wait).await;
    }
}
