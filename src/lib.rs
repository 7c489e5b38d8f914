//! Emote Downloader - bulk backup of Discord custom emoji and stickers.
//!
//! This library provides the download pipeline behind the CLI.
//!
//! # Features
//!
//! - Download emoji and stickers from every joined guild, or a single one
//! - Sequential, rate-limited metadata collection
//! - Concurrent downloads with per-item failure isolation
//! - Animated PNG and LOTTIE sticker handling
//! - Bounded retries for transient network failures
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use emote_downloader::{config::resolve_token, Config, DiscordApi, Pipeline};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default(Path::new("config.toml"))?;
//!     let token = resolve_token(None, &config)?;
//!     let api = Arc::new(DiscordApi::new(&token, &config)?);
//!
//!     let summary = Pipeline::from_config(api, &config)
//!         .run(None, CancellationToken::new())
//!         .await?;
//!     println!("{} files saved", summary.downloads.total_saved());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{ApiTransport, DiscordApi};
pub use config::Config;
pub use download::{Pipeline, RunSummary, WorkQueue, WorkerPool};
pub use error::{Error, Result};
pub use fs::sanitize;
pub use media::{AssetKind, WorkItem};
