//! Download module for the two-phase pipeline.
//!
//! This module provides:
//! - Guild enumeration and metadata collection
//! - The shared work queue
//! - Asset fetching with bounded retries
//! - The concurrent worker pool
//! - Request pacing policies
//! - Run statistics

pub mod collector;
pub mod fetcher;
pub mod pipeline;
pub mod pool;
pub mod queue;
pub mod rate_limit;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use collector::collect_metadata;
pub use fetcher::{AssetFetcher, FetchedAsset};
pub use pipeline::{Pipeline, RunSummary};
pub use pool::WorkerPool;
pub use queue::WorkQueue;
pub use rate_limit::{Endpoint, FixedDelay, RateLimitPolicy};
pub use state::{CollectionSummary, DownloadReport, DownloadStats};
