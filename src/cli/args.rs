//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Discord emote and sticker downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "emote-downloader",
    version,
    about = "Download Discord emotes and stickers.",
    long_about = "Downloads every custom emoji and sticker from the guilds your account has joined,\n\
                  or from a single guild when its ID is given."
)]
pub struct Args {
    /// The ID of the guild to download emotes and stickers from.
    pub guild_id: Option<String>,

    /// Discord account token. Prompted for when not set anywhere.
    #[arg(short, long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Number of concurrent download workers.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Directory emoji images are written to.
    #[arg(long = "emotes-dir")]
    pub emotes_directory: Option<PathBuf>,

    /// Directory stickers are written to.
    #[arg(long = "stickers-dir")]
    pub stickers_directory: Option<PathBuf>,

    /// Milliseconds to pause after each guild's metadata requests.
    #[arg(long)]
    pub guild_delay_ms: Option<u64>,

    /// Retry attempts for transient download failures.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Keep files that already exist instead of downloading them again.
    #[arg(long)]
    pub no_overwrite: bool,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    ///
    /// The token is not merged; it goes through token resolution instead.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.download.workers = workers;
        }

        if let Some(dir) = &self.emotes_directory {
            config.download.emotes_directory = dir.clone();
        }

        if let Some(dir) = &self.stickers_directory {
            config.download.stickers_directory = dir.clone();
        }

        if let Some(delay) = self.guild_delay_ms {
            config.download.guild_delay_ms = delay;
        }

        if let Some(retries) = self.max_retries {
            config.download.max_retries = retries;
        }

        if self.no_overwrite {
            config.download.overwrite_existing = false;
        }
    }
}
